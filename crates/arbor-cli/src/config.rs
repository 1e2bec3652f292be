use crate::cli::{Cli, Preset};
use arbor_core::{
    path::LevelPath,
    predicate::Predicate,
    query::{Query, QueryDescriptor, QueryMode},
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub(crate) enum ConfigError {
    #[error("failed to read query file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid query file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid --path value")]
    Path(#[source] arbor_core::Error),

    #[error("no query given: pass --preset, --query or --mode")]
    NoQuery,

    #[error("invalid query")]
    Query(#[source] arbor_core::Error),
}

/// Built-in query descriptions.
pub(crate) fn preset_descriptor(preset: Preset) -> QueryDescriptor {
    match preset {
        Preset::Grandfathers => QueryDescriptor {
            mode: QueryMode::ExistsMatch,
            path: Some(LevelPath::from_fields(["children", "children"])),
            prefilter: Some(Predicate::eq("sex", "Male")),
            predicate: Predicate::eq_anchor("name", "name"),
        },
        Preset::PythonInProgress => QueryDescriptor {
            mode: QueryMode::FlattenConcat,
            path: Some(LevelPath::from_fields([
                "company",
                "departments",
                "teams",
                "projects",
            ])),
            prefilter: None,
            predicate: Predicate::eq("status", "in_progress")
                & Predicate::contains("technologies", "Python"),
        },
    }
}

/// Read a TOML query description.
pub(crate) fn load_query_file(path: &Path) -> Result<QueryDescriptor, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_query(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn parse_query(text: &str) -> Result<QueryDescriptor, toml::de::Error> {
    toml::from_str(text)
}

/// Resolve the command line into one validated `Query`.
///
/// The base description comes from `--preset` or `--query`; `--mode` and
/// `--path` then override its fields. With neither base, `--mode` alone
/// starts from a match-all description.
pub(crate) fn resolve(cli: &Cli) -> Result<Query, ConfigError> {
    let mut desc = match (cli.preset, cli.query.as_deref()) {
        (Some(preset), _) => preset_descriptor(preset),
        (None, Some(path)) => load_query_file(path)?,
        (None, None) => match cli.mode {
            Some(mode) => QueryDescriptor {
                mode: mode.into(),
                path: None,
                prefilter: None,
                predicate: Predicate::True,
            },
            None => return Err(ConfigError::NoQuery),
        },
    };

    if let Some(mode) = cli.mode {
        desc.mode = mode.into();
    }
    if let Some(path) = cli.path.as_deref() {
        let path: LevelPath = path
            .parse()
            .map_err(|err: arbor_core::path::PathError| ConfigError::Path(err.into()))?;
        desc.path = (!path.is_empty()).then_some(path);
    }

    log::debug!(target: "arbor::config", "resolved query: {desc:?}");

    Query::try_from(desc)
        .map_err(|err| ConfigError::Query(err.into()))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Format, Mode};
    use arbor_core::{ErrorOrigin, query::QueryError};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn cli() -> Cli {
        Cli {
            input: PathBuf::from("people.json"),
            preset: None,
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

    #[test]
    fn presets_are_valid_queries() {
        for preset in [Preset::Grandfathers, Preset::PythonInProgress] {
            let query = Query::try_from(preset_descriptor(preset)).expect("preset validates");
            assert!(!query.path().is_empty());
        }
    }

    #[test]
    fn grandfathers_preset_binds_anchor() {
        let query = Query::try_from(preset_descriptor(Preset::Grandfathers)).unwrap();

        assert_eq!(query.mode(), QueryMode::ExistsMatch);
        assert!(query.predicate().references_anchor());
        assert_eq!(query.prefilter(), Some(&Predicate::eq("sex", "Male")));
    }

    #[test]
    fn parse_query_reads_toml() {
        let desc = parse_query(
            r#"
            mode = "flatten_concat"
            path = "departments.teams"

            [predicate.compare]
            field = "name"
            op = "eq"
            operand = { literal = "Web" }
            "#,
        )
        .unwrap();

        assert_eq!(desc.mode, QueryMode::FlattenConcat);
        assert_eq!(
            desc.path,
            Some(LevelPath::from_fields(["departments", "teams"]))
        );
        assert_eq!(desc.predicate, Predicate::eq("name", "Web"));
    }

    #[test]
    fn parse_query_rejects_unknown_keys() {
        assert!(parse_query("mode = \"filter\"\nlimit = 3\n").is_err());
    }

    #[test]
    fn load_query_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "mode = 7\n").unwrap();

        let err = load_query_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));

        let missing = load_query_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }

    #[test]
    fn resolve_uses_query_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mode = \"filter\"").unwrap();
        writeln!(
            file,
            "predicate = {{ is_present = {{ field = \"children\" }} }}"
        )
        .unwrap();

        let cli = Cli {
            query: Some(file.path().to_path_buf()),
            ..cli()
        };
        let query = resolve(&cli).unwrap();

        assert_eq!(query.mode(), QueryMode::Filter);
        assert_eq!(query.predicate(), &Predicate::is_present("children"));
    }

    #[test]
    fn resolve_applies_overrides() {
        let cli = Cli {
            preset: Some(Preset::PythonInProgress),
            mode: Some(Mode::FlattenConcat),
            path: Some("departments.teams.projects".to_string()),
            ..cli()
        };
        let query = resolve(&cli).unwrap();

        assert_eq!(query.path().to_string(), "departments.teams.projects");
    }

    #[test]
    fn resolve_mode_only_matches_everything() {
        let cli = Cli {
            mode: Some(Mode::Filter),
            ..cli()
        };
        let query = resolve(&cli).unwrap();

        assert_eq!(query.predicate(), &Predicate::True);
    }

    #[test]
    fn resolve_without_query_fails() {
        assert!(matches!(resolve(&cli()), Err(ConfigError::NoQuery)));
    }

    #[test]
    fn resolve_rejects_invalid_combinations() {
        let missing_path = Cli {
            mode: Some(Mode::ExistsMatch),
            ..cli()
        };
        let err = resolve(&missing_path).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::Query(arbor_core::Error::Query(QueryError::MissingPath { .. }))
        ));
        assert_eq!(err.to_string(), "invalid query");

        let bad_path = Cli {
            preset: Some(Preset::Grandfathers),
            path: Some("children..children".to_string()),
            ..cli()
        };
        let err = resolve(&bad_path).unwrap_err();
        let ConfigError::Path(source) = &err else {
            panic!("expected a path error, got {err:?}");
        };
        assert_eq!(source.origin(), ErrorOrigin::Query);
    }
}
