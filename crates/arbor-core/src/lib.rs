//! Core runtime for Arbor: hierarchical nodes, typed attribute values,
//! predicates, level paths and the pure evaluator operations, plus the
//! query executor and its metrics.
#![warn(unreachable_pub)]

pub mod error;
pub mod evaluator;
pub mod node;
pub mod obs;
pub mod path;
pub mod predicate;
pub mod query;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Error, ErrorOrigin};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks or serializers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        evaluator::{evaluate_exists, evaluate_filter, evaluate_reduce_flatten},
        node::Node,
        path::{LevelPath, LevelStep},
        predicate::{CompareOp, Predicate},
        query::{Executor, Query, QueryMode},
        value::Value,
    };
}
