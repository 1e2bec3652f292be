use crate::value::{TextMode, Value, numeric_order, strict_order};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// CoercionId
///
/// Identifier for an explicit coercion policy.
///
/// Coercions express *how* two values may be compared. A pair outside the
/// policy's family falls back to strict, same-variant comparison.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionId {
    #[default]
    Strict,
    NumericWiden,
    TextCasefold,
}

/// Equality under a coercion. `None` means the pair is not comparable.
#[must_use]
pub fn compare_eq(left: &Value, right: &Value, coercion: CoercionId) -> Option<bool> {
    compare_order(left, right, coercion).map(Ordering::is_eq)
}

/// Ordering under a coercion. `None` means the pair is not comparable.
#[must_use]
pub fn compare_order(left: &Value, right: &Value, coercion: CoercionId) -> Option<Ordering> {
    match coercion {
        CoercionId::NumericWiden if left.is_numeric() && right.is_numeric() => {
            numeric_order(left, right)
        }
        CoercionId::TextCasefold if left.is_text() && right.is_text() => {
            left.text_cmp(right, TextMode::Ci)
        }
        _ => strict_order(left, right),
    }
}

/// Check whether `actual` equals any element of `list`.
///
/// Returns `None` when `list` is not a list or no element was comparable,
/// so `NotIn` stays fail-closed against mistyped literals.
#[must_use]
pub(crate) fn in_list(actual: &Value, list: &Value, coercion: CoercionId) -> Option<bool> {
    let Value::List(items) = list else {
        return None;
    };

    let mut saw_valid = false;
    for item in items {
        match compare_eq(actual, item, coercion) {
            Some(true) => return Some(true),
            Some(false) => saw_valid = true,
            None => {}
        }
    }

    saw_valid.then_some(false)
}

/// Check whether a list attribute holds `needle`.
///
/// Returns `None` when `actual` is not a list.
#[must_use]
pub(crate) fn list_contains(actual: &Value, needle: &Value, coercion: CoercionId) -> Option<bool> {
    let Value::List(items) = actual else {
        return None;
    };

    Some(
        items
            .iter()
            // Invalid comparisons are treated as non-matches.
            .any(|item| compare_eq(item, needle, coercion).unwrap_or(false)),
    )
}
