//! Normal-form values and their runtime kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The runtime kind of a value.
///
/// Operators and conditions are statically typed over kinds, but the heap is
/// not, so kind checks on values fetched at runtime go through [`Value::as_int`]
/// and [`Value::as_bool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Int,
    Bool,
    /// The kind of `Skip`.
    Unit,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Int => "int",
            Kind::Bool => "bool",
            Kind::Unit => "unit",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expression in normal form.
///
/// Every [`Expr`](crate::ast::Expr) that cannot be reduced further is exactly
/// one of these. The heap stores `Value`s, never reducible expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Skip,
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Int(_) => Kind::Int,
            Value::Bool(_) => Kind::Bool,
            Value::Skip => Kind::Unit,
        }
    }

    /// Extract an integer, or report the kind actually found.
    pub fn as_int(&self) -> Result<i64, Kind> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(other.kind()),
        }
    }

    /// Extract a boolean, or report the kind actually found.
    pub fn as_bool(&self) -> Result<bool, Kind> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.kind()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "(Int {n})"),
            Value::Bool(b) => write!(f, "(Bool {})", u8::from(*b)),
            Value::Skip => f.write_str("(Skip)"),
        }
    }
}
