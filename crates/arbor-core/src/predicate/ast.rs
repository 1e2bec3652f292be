use crate::{predicate::coercion::CoercionId, value::Value};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{BitAnd, BitOr},
};

///
/// Predicate AST
///
/// Pure, schema-agnostic representation of node predicates.
/// Evaluation lives in `eval`; rewriting lives in `normalize`.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
}

impl CompareOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }
}

///
/// Operand
///
/// Right-hand side of a comparison. `Anchor` reads an attribute from the
/// root node the evaluated descendant was reached from.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    Literal(Value),
    Anchor(String),
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ComparePredicate {
    pub field: String,
    pub op: CompareOp,
    pub operand: Operand,
    #[serde(default)]
    pub coercion: CoercionId,
}

impl ComparePredicate {
    #[must_use]
    pub fn new(field: impl Into<String>, op: CompareOp, operand: impl Into<Operand>) -> Self {
        Self {
            field: field.into(),
            op,
            operand: operand.into(),
            coercion: CoercionId::Strict,
        }
    }

    /// Replace the coercion policy.
    #[must_use]
    pub const fn with_coercion(mut self, coercion: CoercionId) -> Self {
        self.coercion = coercion;
        self
    }
}

///
/// Predicate
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    True,
    False,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare(ComparePredicate),
    IsMissing {
        field: String,
    },
    IsPresent {
        field: String,
    },
    /// List attribute holds an element equal to `value`.
    Contains {
        field: String,
        value: Value,
        #[serde(default)]
        coercion: CoercionId,
    },
}

impl Predicate {
    #[must_use]
    pub const fn and(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    #[must_use]
    pub const fn or(preds: Vec<Self>) -> Self {
        Self::Or(preds)
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(pred: Self) -> Self {
        Self::Not(Box::new(pred))
    }

    #[must_use]
    pub fn compare(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self::Compare(ComparePredicate::new(field, op, value.into()))
    }

    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }

    #[must_use]
    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Ne, value)
    }

    #[must_use]
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lte, value)
    }

    #[must_use]
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gte, value)
    }

    #[must_use]
    pub fn in_(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::compare(field, CompareOp::In, Value::List(values))
    }

    #[must_use]
    pub fn not_in(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::compare(field, CompareOp::NotIn, Value::List(values))
    }

    /// Compare a descendant attribute with the same-typed attribute on the
    /// anchor (root) node.
    #[must_use]
    pub fn eq_anchor(field: impl Into<String>, anchor_field: impl Into<String>) -> Self {
        Self::Compare(ComparePredicate::new(
            field,
            CompareOp::Eq,
            Operand::Anchor(anchor_field.into()),
        ))
    }

    #[must_use]
    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Contains {
            field: field.into(),
            value: value.into(),
            coercion: CoercionId::Strict,
        }
    }

    #[must_use]
    pub fn is_missing(field: impl Into<String>) -> Self {
        Self::IsMissing {
            field: field.into(),
        }
    }

    #[must_use]
    pub fn is_present(field: impl Into<String>) -> Self {
        Self::IsPresent {
            field: field.into(),
        }
    }

    /// Whether any comparison in the tree reads from the anchor node.
    #[must_use]
    pub fn references_anchor(&self) -> bool {
        match self {
            Self::And(children) | Self::Or(children) => {
                children.iter().any(Self::references_anchor)
            }
            Self::Not(inner) => inner.references_anchor(),
            Self::Compare(cmp) => matches!(cmp.operand, Operand::Anchor(_)),
            Self::True
            | Self::False
            | Self::IsMissing { .. }
            | Self::IsPresent { .. }
            | Self::Contains { .. } => false,
        }
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitAnd for &Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Self) -> Self::Output {
        Predicate::And(vec![self.clone(), rhs.clone()])
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

impl BitOr for &Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: Self) -> Self::Output {
        Predicate::Or(vec![self.clone(), rhs.clone()])
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(Value::Text(s)) => write!(f, "{s:?}"),
            Self::Literal(value) => write!(f, "{value}"),
            Self::Anchor(field) => write!(f, "$anchor.{field}"),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => f.write_str("TRUE"),
            Self::False => f.write_str("FALSE"),
            Self::And(children) => write_joined(f, children, " AND ", "TRUE"),
            Self::Or(children) => write_joined(f, children, " OR ", "FALSE"),
            Self::Not(inner) => write!(f, "NOT {inner}"),
            Self::Compare(cmp) => write!(f, "{} {} {}", cmp.field, cmp.op.symbol(), cmp.operand),
            Self::IsMissing { field } => write!(f, "{field} IS MISSING"),
            Self::IsPresent { field } => write!(f, "{field} IS PRESENT"),
            Self::Contains { field, value, .. } => {
                write!(f, "{field} CONTAINS {}", Operand::Literal(value.clone()))
            }
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    children: &[Predicate],
    sep: &str,
    empty: &str,
) -> fmt::Result {
    if children.is_empty() {
        return f.write_str(empty);
    }

    f.write_str("(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{child}")?;
    }
    f.write_str(")")
}
