//! `arbor` command line tool: load a JSON document, evaluate one query and
//! print the matched records, optionally with timing figures and metrics.

mod cli;
mod config;
mod render;

use anyhow::Context;
use arbor_core::{
    ErrorOrigin,
    node::load_roots,
    obs::{measure, metrics_report},
    query::{Executor, QueryDescriptor},
};
use clap::Parser;
use cli::Cli;
use std::{
    fs,
    io::{self, Write},
    process::ExitCode,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match origin(&err) {
                Some(origin) => eprintln!("error: invalid {origin}: {err:#}"),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_module("arbor", log::LevelFilter::Debug);
        }
        _ => {
            builder.filter_module("arbor", log::LevelFilter::Trace);
        }
    }
    builder.target(env_logger::Target::Stderr).init();
}

/// Whether a failure came from the input document or the query, when the
/// core library raised it.
fn origin(err: &anyhow::Error) -> Option<ErrorOrigin> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<arbor_core::Error>())
        .map(arbor_core::Error::origin)
}

fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let query = config::resolve(cli)?;

    if cli.explain {
        let desc = toml::to_string_pretty(&QueryDescriptor::from(&query))
            .context("failed to serialize query")?;
        writeln!(out, "# {query}")?;
        write!(out, "{desc}")?;
        return Ok(());
    }

    let document = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let roots = load_roots(&document)
        .map_err(arbor_core::Error::from)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;
    log::debug!(
        target: "arbor::cli",
        "loaded {} roots from {}",
        roots.len(),
        cli.input.display()
    );

    let executor = Executor::new();
    let measured = measure(|| executor.execute(&query, &roots));

    render::render(out, &measured.value, cli.format)?;
    if cli.timing {
        render::render_timing(out, render::Timing::from_measured(&measured))?;
    }
    if cli.metrics {
        let report = serde_json::to_string_pretty(&metrics_report(None))
            .context("failed to serialize metrics")?;
        writeln!(out, "{report}")?;
    }

    Ok(())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Format, Preset};
    use pretty_assertions::assert_eq;
    use std::path::{Path, PathBuf};

    const FAMILY: &str = r#"[
        {"name": "John", "surname": "Doe", "sex": "Male", "children": [
            {"name": "Robert", "surname": "Doe", "children": [
                {"name": "John", "surname": "Doe"}
            ]}
        ]},
        {"name": "William", "surname": "Doe", "sex": "Male", "children": [
            {"name": "Anna", "surname": "Doe", "children": [
                {"name": "George", "surname": "Doe"}
            ]}
        ]},
        {"name": "Mary", "surname": "Doe", "sex": "Female", "children": [
            {"name": "Lucy", "surname": "Doe", "children": [
                {"name": "Mary", "surname": "Doe"}
            ]}
        ]}
    ]"#;

    fn cli(input: &Path) -> Cli {
        Cli {
            input: input.to_path_buf(),
            preset: Some(Preset::Grandfathers),
            query: None,
            mode: None,
            path: None,
            format: Format::Lines,
            timing: false,
            metrics: false,
            explain: false,
            verbose: 0,
        }
    }

    fn output(cli: &Cli) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn family_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FAMILY.as_bytes()).unwrap();
        file
    }

    #[test]
    fn grandfathers_preset_lists_john() {
        let file = family_file();

        assert_eq!(
            output(&cli(file.path())).unwrap(),
            "1 result(s)\n- John Doe\n"
        );
    }

    #[test]
    fn timing_follows_results() {
        let file = family_file();
        let cli = Cli {
            timing: true,
            ..cli(file.path())
        };
        let text = output(&cli).unwrap();

        let results = "1 result(s)\n- John Doe\n";
        assert!(text.starts_with(&format!("{results}Execution time: ")));
        assert!(text.contains("Results returned: 1\n"));
        assert!(text.ends_with("Document overhead: 0\n"));
    }

    #[test]
    fn metrics_report_is_json() {
        let file = family_file();
        let cli = Cli {
            format: Format::Count,
            metrics: true,
            ..cli(file.path())
        };
        let text = output(&cli).unwrap();
        let (count, report) = text.split_once('\n').unwrap();

        assert_eq!(count, "1");
        let report: serde_json::Value = serde_json::from_str(report).unwrap();
        assert!(report["kind_summaries"].is_array());
    }

    #[test]
    fn explain_skips_the_input() {
        let cli = Cli {
            explain: true,
            ..cli(Path::new("does-not-exist.json"))
        };
        let text = output(&cli).unwrap();

        assert!(text.starts_with("# exists_match"));
        assert!(text.contains("mode = \"exists_match\""));
        assert!(text.contains("\"children\""));
    }

    #[test]
    fn missing_input_is_reported() {
        let cli = cli(&PathBuf::from("does-not-exist.json"));
        let err = output(&cli).unwrap_err();

        assert!(err.to_string().contains("does-not-exist.json"));
        assert_eq!(origin(&err), None);
    }

    #[test]
    fn malformed_document_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"42").unwrap();

        let err = output(&cli(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load"));
        assert_eq!(origin(&err), Some(ErrorOrigin::Document));
    }

    #[test]
    fn invalid_query_reports_query_origin() {
        let file = family_file();
        let cli = Cli {
            path: Some("children..children".to_string()),
            ..cli(file.path())
        };
        let err = output(&cli).unwrap_err();

        assert!(format!("{err:#}").starts_with("invalid --path value: "));
        assert_eq!(origin(&err), Some(ErrorOrigin::Query));
    }
}
