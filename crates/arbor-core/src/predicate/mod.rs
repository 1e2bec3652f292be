pub(crate) mod ast;
pub(crate) mod coercion;
pub(crate) mod eval;
pub(crate) mod normalize;


pub use ast::{CompareOp, ComparePredicate, Operand, Predicate};
pub use coercion::{CoercionId, compare_eq, compare_order};
pub use eval::{FieldPresence, Row, eval, eval_anchored};
pub use normalize::normalize;
