use crate::predicate::ast::Predicate;

///
/// Normalize a predicate into a canonical form.
///
/// Normalization guarantees:
/// - Logical equivalence is preserved
/// - Nested AND / OR nodes are flattened
/// - Neutral elements are removed (True / False)
/// - Double negation is eliminated
///
/// Child order is kept as written so short-circuiting still follows the
/// author's ordering.
///
#[must_use]
pub fn normalize(predicate: &Predicate) -> Predicate {
    match predicate {
        Predicate::And(children) => normalize_and(children),
        Predicate::Or(children) => normalize_or(children),
        Predicate::Not(inner) => normalize_not(inner),
        other => other.clone(),
    }
}

///
/// Normalize a NOT expression.
///
/// - NOT (NOT x)  →  x
/// - NOT True     →  False
/// - NOT False    →  True
///
fn normalize_not(inner: &Predicate) -> Predicate {
    match normalize(inner) {
        Predicate::Not(double) => *double,
        Predicate::True => Predicate::False,
        Predicate::False => Predicate::True,
        normalized => Predicate::Not(Box::new(normalized)),
    }
}

///
/// Normalize an AND expression.
///
/// Rules:
/// - AND(True, x)        → x
/// - AND(False, x)       → False
/// - AND(AND(a, b), c)   → AND(a, b, c)
/// - AND()               → True
/// - AND(x)              → x
///
fn normalize_and(children: &[Predicate]) -> Predicate {
    let mut out = Vec::new();

    for child in children {
        match normalize(child) {
            Predicate::True => {}
            Predicate::False => return Predicate::False,
            Predicate::And(grandchildren) => out.extend(grandchildren),
            other => out.push(other),
        }
    }

    match out.len() {
        0 => Predicate::True,
        1 => out.remove(0),
        _ => Predicate::And(out),
    }
}

///
/// Normalize an OR expression.
///
/// Rules:
/// - OR(False, x)       → x
/// - OR(True, x)        → True
/// - OR(OR(a, b), c)    → OR(a, b, c)
/// - OR()               → False
/// - OR(x)              → x
///
fn normalize_or(children: &[Predicate]) -> Predicate {
    let mut out = Vec::new();

    for child in children {
        match normalize(child) {
            Predicate::False => {}
            Predicate::True => return Predicate::True,
            Predicate::Or(grandchildren) => out.extend(grandchildren),
            other => out.push(other),
        }
    }

    match out.len() {
        0 => Predicate::False,
        1 => out.remove(0),
        _ => Predicate::Or(out),
    }
}
