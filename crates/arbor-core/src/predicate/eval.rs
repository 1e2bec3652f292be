use crate::{
    node::Node,
    predicate::{
        CompareOp, ComparePredicate, Operand, Predicate,
        coercion::{compare_eq, compare_order, in_list, list_contains},
    },
    value::Value,
};
use std::cmp::Ordering;

///
/// FieldPresence
///
/// Result of attempting to read an attribute during predicate evaluation.
/// Distinguishes a missing attribute from one present with `Value::Null`.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldPresence<'a> {
    /// Attribute exists (including `Value::Null`).
    Present(&'a Value),
    /// Attribute is not present on the row.
    Missing,
}

///
/// Row
///
/// Abstraction over a record that exposes attributes by name.
/// Decouples predicate evaluation from the concrete `Node` type.
///

pub trait Row {
    fn field(&self, name: &str) -> FieldPresence<'_>;
}

impl Row for Node {
    fn field(&self, name: &str) -> FieldPresence<'_> {
        match self.attribute(name) {
            Some(value) => FieldPresence::Present(value),
            None => FieldPresence::Missing,
        }
    }
}

///
/// Evaluate a predicate against a single row.
///
/// Pure runtime evaluation: a missing attribute or an incomparable pair
/// makes the comparison false. Anchor operands are unresolvable here and
/// also evaluate to false.
///
#[must_use]
pub fn eval<R: Row + ?Sized>(row: &R, predicate: &Predicate) -> bool {
    eval_anchored::<R, R>(row, None, predicate)
}

///
/// Evaluate a predicate against a row reached from `anchor`.
///
/// `Operand::Anchor(field)` reads `field` from the anchor; a missing anchor
/// or a missing anchor attribute makes that comparison unknown.
///
/// Unknown comparisons propagate through `Not`, `And` and `Or` with
/// three-valued logic and only collapse to `false` here, so negating a
/// comparison on a missing field never turns it into a match.
///
#[must_use]
pub fn eval_anchored<R, A>(row: &R, anchor: Option<&A>, predicate: &Predicate) -> bool
where
    R: Row + ?Sized,
    A: Row + ?Sized,
{
    eval_tri(row, anchor, predicate).unwrap_or(false)
}

// `None` means unknown: a missing field, an unresolved anchor or an
// incomparable pair.
fn eval_tri<R, A>(row: &R, anchor: Option<&A>, predicate: &Predicate) -> Option<bool>
where
    R: Row + ?Sized,
    A: Row + ?Sized,
{
    match predicate {
        Predicate::True => Some(true),
        Predicate::False => Some(false),

        Predicate::And(children) => {
            let mut unknown = false;
            for child in children {
                match eval_tri(row, anchor, child) {
                    Some(false) => return Some(false),
                    None => unknown = true,
                    Some(true) => {}
                }
            }
            (!unknown).then_some(true)
        }
        Predicate::Or(children) => {
            let mut unknown = false;
            for child in children {
                match eval_tri(row, anchor, child) {
                    Some(true) => return Some(true),
                    None => unknown = true,
                    Some(false) => {}
                }
            }
            (!unknown).then_some(false)
        }
        Predicate::Not(inner) => eval_tri(row, anchor, inner).map(|value| !value),

        Predicate::Compare(cmp) => eval_compare(row, anchor, cmp),

        Predicate::IsMissing { field } => Some(matches!(row.field(field), FieldPresence::Missing)),
        Predicate::IsPresent { field } => {
            Some(matches!(row.field(field), FieldPresence::Present(_)))
        }

        Predicate::Contains {
            field,
            value,
            coercion,
        } => match row.field(field) {
            FieldPresence::Present(actual) => list_contains(actual, value, *coercion),
            FieldPresence::Missing => None,
        },
    }
}

///
/// Evaluate a single comparison.
///
/// Returns `None` if:
/// - the field is missing
/// - the operand cannot be resolved
/// - the comparison is not defined under the given coercion
///
fn eval_compare<R, A>(row: &R, anchor: Option<&A>, cmp: &ComparePredicate) -> Option<bool>
where
    R: Row + ?Sized,
    A: Row + ?Sized,
{
    let ComparePredicate {
        field,
        op,
        operand,
        coercion,
    } = cmp;

    let FieldPresence::Present(actual) = row.field(field) else {
        return None;
    };
    let expected = resolve_operand(anchor, operand)?;
    let coercion = *coercion;

    match op {
        CompareOp::Eq => compare_eq(actual, expected, coercion),
        CompareOp::Ne => compare_eq(actual, expected, coercion).map(|eq| !eq),

        CompareOp::Lt => compare_order(actual, expected, coercion).map(Ordering::is_lt),
        CompareOp::Lte => compare_order(actual, expected, coercion).map(Ordering::is_le),
        CompareOp::Gt => compare_order(actual, expected, coercion).map(Ordering::is_gt),
        CompareOp::Gte => compare_order(actual, expected, coercion).map(Ordering::is_ge),

        CompareOp::In => in_list(actual, expected, coercion),
        CompareOp::NotIn => in_list(actual, expected, coercion).map(|matched| !matched),
    }
}

fn resolve_operand<'a, A: Row + ?Sized>(
    anchor: Option<&'a A>,
    operand: &'a Operand,
) -> Option<&'a Value> {
    match operand {
        Operand::Literal(value) => Some(value),
        Operand::Anchor(field) => match anchor?.field(field) {
            FieldPresence::Present(value) => Some(value),
            FieldPresence::Missing => None,
        },
    }
}
