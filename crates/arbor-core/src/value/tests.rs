use crate::value::{TextMode, Value, numeric_order, strict_order};
use std::cmp::Ordering;

// ---- helpers -----------------------------------------------------------

fn v_txt(s: &str) -> Value {
    Value::Text(s.to_string())
}

// ---- json --------------------------------------------------------------

#[test]
fn from_json_maps_scalars_and_scalar_lists() {
    let json = serde_json::json!(["Python", 3, -4, 1.5, true, null]);

    assert_eq!(
        Value::from_json(&json),
        Some(Value::List(vec![
            v_txt("Python"),
            Value::Int(3),
            Value::Int(-4),
            Value::Float64(1.5),
            Value::Bool(true),
            Value::Null,
        ]))
    );
}

#[test]
fn from_json_large_unsigned_becomes_uint() {
    let json = serde_json::json!(u64::MAX);

    assert_eq!(Value::from_json(&json), Some(Value::Uint(u64::MAX)));
}

#[test]
fn from_json_rejects_objects_and_nested_objects() {
    assert_eq!(Value::from_json(&serde_json::json!({"a": 1})), None);
    assert_eq!(Value::from_json(&serde_json::json!([1, {"a": 1}])), None);
}

#[test]
fn to_json_mirrors_from_json() {
    let json = serde_json::json!({"tags": ["a", "b"]});
    let value = Value::from_json(&json["tags"]).expect("scalar list");

    assert_eq!(value.to_json(), json["tags"]);
}

// ---- comparisons ---------------------------------------------------------

#[test]
fn strict_order_requires_same_variant() {
    assert_eq!(
        strict_order(&Value::Int(1), &Value::Int(2)),
        Some(Ordering::Less)
    );
    assert_eq!(strict_order(&Value::Int(1), &Value::Uint(1)), None);
    assert_eq!(strict_order(&v_txt("1"), &Value::Int(1)), None);
}

#[test]
fn strict_order_lists_are_lexicographic() {
    let short = Value::from(vec!["a"]);
    let long = Value::from(vec!["a", "b"]);

    assert_eq!(strict_order(&short, &long), Some(Ordering::Less));
    assert_eq!(strict_order(&long, &long), Some(Ordering::Equal));
}

#[test]
fn numeric_order_widens_across_int_families() {
    assert_eq!(
        numeric_order(&Value::Int(-1), &Value::Uint(u64::MAX)),
        Some(Ordering::Less)
    );
    assert_eq!(
        numeric_order(&Value::Uint(3), &Value::Float64(3.0)),
        Some(Ordering::Equal)
    );
    assert_eq!(numeric_order(&v_txt("3"), &Value::Int(3)), None);
}

#[test]
fn nan_is_incomparable() {
    assert_eq!(
        numeric_order(&Value::Float64(f64::NAN), &Value::Float64(1.0)),
        None
    );
}

// ---- text ----------------------------------------------------------------

#[test]
fn text_ops_cs_ci() {
    let a = v_txt("In_Progress");

    assert_eq!(a.text_eq(&v_txt("in_progress"), TextMode::Cs), Some(false));
    assert_eq!(a.text_eq(&v_txt("in_progress"), TextMode::Ci), Some(true));
    assert_eq!(a.text_contains(&v_txt("PROG"), TextMode::Ci), Some(true));
    assert_eq!(a.text_eq(&Value::Int(1), TextMode::Ci), None);
}

#[test]
fn display_renders_lists_inline() {
    let value = Value::from(vec!["Python", "Rust"]);

    assert_eq!(value.to_string(), "[Python, Rust]");
    assert_eq!(Value::Null.to_string(), "null");
}
