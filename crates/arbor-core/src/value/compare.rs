use crate::value::Value;
use std::cmp::Ordering;

///
/// Value comparison primitives
///
/// Both functions return `None` when the pair is not comparable under the
/// respective policy. Callers treat `None` as "no match".
///

/// Order two values of the same variant.
///
/// Lists compare lexicographically; mixed variants are incomparable.
#[must_use]
pub fn strict_order(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
        (Value::Float64(a), Value::Float64(b)) => a.partial_cmp(b),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::List(a), Value::List(b)) => {
            for (x, y) in a.iter().zip(b.iter()) {
                match strict_order(x, y)? {
                    Ordering::Equal => {}
                    other => return Some(other),
                }
            }
            Some(a.len().cmp(&b.len()))
        }
        _ => None,
    }
}

/// Order two numeric values after widening.
///
/// Integer pairs widen to `i128` so `Int(-1)` and `Uint(u64::MAX)` still
/// compare exactly; any float operand widens both sides to `f64`.
#[must_use]
pub fn numeric_order(left: &Value, right: &Value) -> Option<Ordering> {
    match (as_i128(left), as_i128(right)) {
        (Some(a), Some(b)) => Some(a.cmp(&b)),
        _ => as_f64(left)?.partial_cmp(&as_f64(right)?),
    }
}

const fn as_i128(value: &Value) -> Option<i128> {
    match value {
        Value::Int(i) => Some(*i as i128),
        Value::Uint(u) => Some(*u as i128),
        _ => None,
    }
}

#[expect(clippy::cast_precision_loss)]
const fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Uint(u) => Some(*u as f64),
        Value::Float64(f) => Some(*f),
        _ => None,
    }
}
