mod compare;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::{borrow::Cow, cmp::Ordering, fmt};

// re-exports
pub use compare::{numeric_order, strict_order};

///
/// TextMode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextMode {
    Cs, // case-sensitive
    Ci, // case-insensitive
}

///
/// Value
///
/// Scalar (or list-of-scalar) attribute value carried by a `Node`.
///
/// Null        → the attribute is present but explicitly empty (JSON `null`).
/// List        → ordered list of scalars, e.g. a project's technologies.
///
/// Enum-like attributes (`sex`, `status`) are plain `Text`; the evaluator
/// never needs to know the closed set of variants.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float64(f64),
    Text(String),
    /// Ordered list of values.
    /// List order is preserved from the source document.
    List(Vec<Self>),
    Null,
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Convert a JSON scalar or array of scalars into a `Value`.
    ///
    /// Returns `None` for JSON objects and for arrays holding objects; those
    /// shapes become child collections on a `Node` instead.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        let value = match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Uint(u)
                } else {
                    Self::Float64(n.as_f64()?)
                }
            }
            serde_json::Value::String(s) => Self::Text(s.clone()),
            serde_json::Value::Array(items) => Self::List(
                items
                    .iter()
                    .map(Self::from_json)
                    .collect::<Option<Vec<_>>>()?,
            ),
            serde_json::Value::Object(_) => return None,
        };

        Some(value)
    }

    /// Render this value back into JSON.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::Uint(u) => serde_json::Value::from(*u),
            Self::Float64(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::List(items) => {
                serde_json::Value::Array(items.iter().map(Self::to_json).collect())
            }
            Self::Null => serde_json::Value::Null,
        }
    }

    ///
    /// TYPES
    ///

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Uint(_) | Self::Float64(_))
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    /// Stable lowercase name of the variant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float64(_) => "float64",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Null => "null",
        }
    }

    ///
    /// TEXT
    ///

    fn fold_ci(s: &str) -> Cow<'_, str> {
        if s.is_ascii() {
            return Cow::Owned(s.to_ascii_lowercase());
        }

        Cow::Owned(s.to_lowercase())
    }

    fn text_with_mode(s: &str, mode: TextMode) -> Cow<'_, str> {
        match mode {
            TextMode::Cs => Cow::Borrowed(s),
            TextMode::Ci => Self::fold_ci(s),
        }
    }

    /// Compare two text values under the given mode.
    /// Returns `None` unless both sides are text.
    #[must_use]
    pub fn text_eq(&self, other: &Self, mode: TextMode) -> Option<bool> {
        let (Self::Text(a), Self::Text(b)) = (self, other) else {
            return None;
        };

        let a = Self::text_with_mode(a, mode);
        let b = Self::text_with_mode(b, mode);
        Some(a == b)
    }

    /// Check whether `self` contains `needle` as a substring.
    #[must_use]
    pub fn text_contains(&self, needle: &Self, mode: TextMode) -> Option<bool> {
        let (Self::Text(a), Self::Text(b)) = (self, needle) else {
            return None;
        };

        let a = Self::text_with_mode(a, mode);
        let b = Self::text_with_mode(b, mode);
        Some(a.contains(b.as_ref()))
    }

    /// Order two text values under the given mode.
    #[must_use]
    pub fn text_cmp(&self, other: &Self, mode: TextMode) -> Option<Ordering> {
        let (Self::Text(a), Self::Text(b)) = (self, other) else {
            return None;
        };

        let a = Self::text_with_mode(a, mode);
        let b = Self::text_with_mode(b, mode);
        Some(a.cmp(&b))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Self::Uint(u)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}
