use std::fmt;

use serde::{Deserialize, Serialize};

use super::Operator;

/// A bare scalar appearing as (or inside) a condition's right operand.
///
/// Untagged: JSON integers deserialize as `Int`, everything else falls
/// through in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// Render this scalar as an opaque entity id.
    ///
    /// Id sets on the wire are usually strings, but numeric ids have been
    /// observed; both become their canonical string form.
    #[must_use]
    pub fn as_id(&self) -> String {
        match self {
            Scalar::Str(s) => s.clone(),
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }

    /// Coerce this scalar to an integer minor-units amount.
    ///
    /// Strings are parsed, floats are accepted only when they carry no
    /// fractional part. Returns `None` when no lossless coercion exists.
    #[must_use]
    pub fn as_minor_units(&self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(*n),
            #[allow(clippy::cast_possible_truncation)]
            Scalar::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(*f as i64),
            Scalar::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The string payload, if this scalar is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Str(v) => write!(f, "\"{v}\""),
        }
    }
}

/// A condition's right-hand side: one scalar or a membership set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RightOperand {
    One(Scalar),
    Many(Vec<Scalar>),
}

impl RightOperand {
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            RightOperand::One(s) => Some(s),
            RightOperand::Many(_) => None,
        }
    }

    /// The membership set, treating a lone scalar as a one-element set.
    #[must_use]
    pub fn as_set(&self) -> &[Scalar] {
        match self {
            RightOperand::One(s) => std::slice::from_ref(s),
            RightOperand::Many(v) => v,
        }
    }
}

impl From<Scalar> for RightOperand {
    fn from(v: Scalar) -> Self {
        RightOperand::One(v)
    }
}

impl From<i64> for RightOperand {
    fn from(v: i64) -> Self {
        RightOperand::One(Scalar::Int(v))
    }
}

impl From<Vec<Scalar>> for RightOperand {
    fn from(v: Vec<Scalar>) -> Self {
        RightOperand::Many(v)
    }
}

/// A named reference to a dotted path into the evaluated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    pub name: String,
}

impl From<&str> for FieldRef {
    fn from(name: &str) -> Self {
        FieldRef {
            name: name.to_owned(),
        }
    }
}

/// One leaf predicate: `operator(left_operand, right_operand)`.
///
/// This editor only serializes leaves; evaluating them is the server rule
/// engine's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub operator: Operator,
    pub left_operand: FieldRef,
    pub right_operand: RightOperand,
}

impl Condition {
    /// An `in` leaf testing membership of `field` in a set of ids.
    #[must_use]
    pub fn membership(field: &str, ids: &[String]) -> Self {
        Condition {
            operator: Operator::In,
            left_operand: field.into(),
            right_operand: RightOperand::Many(
                ids.iter().map(|id| Scalar::Str(id.clone())).collect(),
            ),
        }
    }

    /// A comparison leaf against an integer minor-units bound.
    #[must_use]
    pub fn comparison(field: &str, operator: Operator, bound: i64) -> Self {
        Condition {
            operator,
            left_operand: field.into(),
            right_operand: bound.into(),
        }
    }

    /// An `==` leaf against a single scalar.
    #[must_use]
    pub fn equality(field: &str, value: impl Into<Scalar>) -> Self {
        Condition {
            operator: Operator::Eq,
            left_operand: field.into(),
            right_operand: RightOperand::One(value.into()),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} ", self.left_operand.name, self.operator)?;
        match &self.right_operand {
            RightOperand::One(s) => write!(f, "{s})"),
            RightOperand::Many(set) => {
                write!(f, "[")?;
                for (i, s) in set.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{s}")?;
                }
                write!(f, "])")
            }
        }
    }
}

/// One element of a conjunction's `all` array.
///
/// The wire interleaves boilerplate guard strings with condition objects;
/// anything that is neither (a malformed object, an operator or shape this
/// editor does not understand) lands in `Opaque` with its raw JSON intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Element {
    Guard(String),
    Leaf(Condition),
    Opaque(serde_json::Value),
}

impl Element {
    #[must_use]
    pub fn as_leaf(&self) -> Option<&Condition> {
        match self {
            Element::Leaf(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Condition> for Element {
    fn from(c: Condition) -> Self {
        Element::Leaf(c)
    }
}

/// The wire-format rule tree: an "ALL of" grouping of leaf predicates and
/// guard literals. Treated as an order-insensitive collection by the
/// decoder; the encoder emits a deterministic order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Conjunction {
    pub all: Vec<Element>,
}

impl Conjunction {
    #[must_use]
    pub fn new(all: Vec<Element>) -> Self {
        Conjunction { all }
    }

    /// Iterate over the condition leaves, skipping guards and opaque
    /// elements.
    pub fn leaves(&self) -> impl Iterator<Item = &Condition> {
        self.all.iter().filter_map(Element::as_leaf)
    }

    /// Parse a conjunction from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error when the input is not a
    /// conjunction object.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Serialize this conjunction to its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error on serialization failure.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
