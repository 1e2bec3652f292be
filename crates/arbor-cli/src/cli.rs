use arbor_core::query::QueryMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

///
/// Cli
///
/// Load a JSON document, evaluate one query against it and print the
/// matched records.
///

#[derive(Debug, Parser)]
#[command(name = "arbor", version, about)]
pub(crate) struct Cli {
    /// JSON document holding a list of root records.
    #[arg(short, long, env = "ARBOR_INPUT")]
    pub input: PathBuf,

    /// Built-in query to run.
    #[arg(short, long, value_enum, conflicts_with = "query")]
    pub preset: Option<Preset>,

    /// TOML query description file.
    #[arg(short, long)]
    pub query: Option<PathBuf>,

    /// Aggregation mode, overriding the preset or query file.
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Dotted traversal path, overriding the preset or query file.
    #[arg(long)]
    pub path: Option<String>,

    /// Output format for matched records.
    #[arg(short, long, value_enum, default_value_t = Format::Lines)]
    pub format: Format,

    /// Print execution time, result count and payload size.
    #[arg(long)]
    pub timing: bool,

    /// Print the evaluation metrics report as JSON after the results.
    #[arg(long)]
    pub metrics: bool,

    /// Print the resolved query and exit without evaluating.
    #[arg(long)]
    pub explain: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

///
/// Preset
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum Preset {
    /// Male roots with a grandchild sharing their name.
    Grandfathers,
    /// Projects in progress that use Python, across company hierarchies.
    PythonInProgress,
}

///
/// Mode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum Mode {
    Filter,
    FlattenConcat,
    ExistsMatch,
}

impl From<Mode> for QueryMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Filter => Self::Filter,
            Mode::FlattenConcat => Self::FlattenConcat,
            Mode::ExistsMatch => Self::ExistsMatch,
        }
    }
}

///
/// Format
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum Format {
    /// One `- name surname` line per record, preceded by a count.
    Lines,
    /// Pretty-printed JSON array.
    Json,
    /// Only the number of matched records.
    Count,
}
