use crate::{
    path::LevelPath,
    predicate::Predicate,
    query::{Query, QueryMode},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Structural problems in a serialized query description. Evaluation never
/// raises these; they are caught when a description becomes a `Query`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error("{mode} query requires a non-empty path")]
    MissingPath { mode: QueryMode },

    #[error("{mode} query evaluates roots directly and takes no path")]
    UnexpectedPath { mode: QueryMode },

    #[error("{location} references the anchor node, which only exists_match predicates bind")]
    AnchorOutsideExists { location: &'static str },
}

///
/// QueryDescriptor
///
/// Serialized form of a `Query`, read from TOML or JSON query files.
///
/// ```toml
/// mode = "exists_match"
/// path = "children.children"
/// prefilter = { compare = { field = "sex", op = "eq", operand = { literal = "Male" } } }
/// predicate = { compare = { field = "name", op = "eq", operand = { anchor = "name" } } }
/// ```
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueryDescriptor {
    pub mode: QueryMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<LevelPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefilter: Option<Predicate>,
    #[serde(default = "match_all")]
    pub predicate: Predicate,
}

const fn match_all() -> Predicate {
    Predicate::True
}

impl TryFrom<QueryDescriptor> for Query {
    type Error = QueryError;

    fn try_from(desc: QueryDescriptor) -> Result<Self, Self::Error> {
        let QueryDescriptor {
            mode,
            path,
            prefilter,
            predicate,
        } = desc;
        let path = path.unwrap_or_default();

        if path.anchored_step().is_some() {
            return Err(QueryError::AnchorOutsideExists {
                location: "path guard",
            });
        }
        if prefilter.as_ref().is_some_and(Predicate::references_anchor) {
            return Err(QueryError::AnchorOutsideExists {
                location: "prefilter",
            });
        }

        let query = match mode {
            QueryMode::Filter => {
                if !path.is_empty() {
                    return Err(QueryError::UnexpectedPath { mode });
                }
                Self::filter(predicate)
            }
            QueryMode::FlattenConcat => {
                if path.is_empty() {
                    return Err(QueryError::MissingPath { mode });
                }
                Self::flatten(path, predicate)
            }
            QueryMode::ExistsMatch => {
                if path.is_empty() {
                    return Err(QueryError::MissingPath { mode });
                }
                Self::exists(path, predicate)
            }
        };

        if mode != QueryMode::ExistsMatch && query.predicate().references_anchor() {
            return Err(QueryError::AnchorOutsideExists {
                location: "predicate",
            });
        }

        Ok(match prefilter {
            Some(prefilter) => query.with_prefilter(prefilter),
            None => query,
        })
    }
}

impl From<&Query> for QueryDescriptor {
    fn from(query: &Query) -> Self {
        Self {
            mode: query.mode(),
            path: (!query.path().is_empty()).then(|| query.path().clone()),
            prefilter: query.prefilter().cloned(),
            predicate: query.predicate().clone(),
        }
    }
}
