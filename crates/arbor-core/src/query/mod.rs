mod descriptor;
mod executor;
mod response;


use crate::{obs::EvalKind, path::LevelPath, predicate::Predicate};
use std::fmt;

// re-exports
pub use descriptor::{QueryDescriptor, QueryError};
pub use executor::Executor;
pub use response::Response;

///
/// QueryMode
///
/// Aggregation mode of a query; one-to-one with the evaluator operations.
///

pub type QueryMode = EvalKind;

///
/// Query
///
/// Immutable, declarative description of one evaluation: an optional root
/// prefilter, a traversal path and a predicate over the nodes reached.
///
/// - `Filter` keeps the roots themselves; the path is always empty.
/// - `FlattenConcat` keeps the leaves reached at the end of the path.
/// - `ExistsMatch` keeps roots with a matching leaf; the predicate may use
///   `Operand::Anchor` to read the root's attributes.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    mode: QueryMode,
    prefilter: Option<Predicate>,
    path: LevelPath,
    predicate: Predicate,
}

impl Query {
    #[must_use]
    pub fn filter(predicate: Predicate) -> Self {
        Self {
            mode: QueryMode::Filter,
            prefilter: None,
            path: LevelPath::default(),
            predicate,
        }
    }

    #[must_use]
    pub const fn flatten(path: LevelPath, predicate: Predicate) -> Self {
        Self {
            mode: QueryMode::FlattenConcat,
            prefilter: None,
            path,
            predicate,
        }
    }

    #[must_use]
    pub const fn exists(path: LevelPath, predicate: Predicate) -> Self {
        Self {
            mode: QueryMode::ExistsMatch,
            prefilter: None,
            path,
            predicate,
        }
    }

    /// Restrict the roots considered before any traversal.
    #[must_use]
    pub fn with_prefilter(mut self, prefilter: Predicate) -> Self {
        self.prefilter = Some(prefilter);
        self
    }

    ///
    /// ACCESSORS
    ///

    #[must_use]
    pub const fn mode(&self) -> QueryMode {
        self.mode
    }

    #[must_use]
    pub const fn prefilter(&self) -> Option<&Predicate> {
        self.prefilter.as_ref()
    }

    #[must_use]
    pub const fn path(&self) -> &LevelPath {
        &self.path
    }

    #[must_use]
    pub const fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mode)?;
        if let Some(prefilter) = &self.prefilter {
            write!(f, " roots WHERE {prefilter}")?;
        }
        if !self.path.is_empty() {
            write!(f, " VIA {}", self.path)?;
        }
        write!(f, " MATCH {}", self.predicate)
    }
}
