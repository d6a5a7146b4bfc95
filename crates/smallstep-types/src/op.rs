//! The operator table.
//!
//! Only six (operator, result kind) pairs exist:
//!
//! | Operator | Operands | Result |
//! |----------|----------|--------|
//! | `Plus`, `Minus`, `Times`, `Divide` | int × int | int |
//! | `Less`, `Equal` | int × int | bool |
//!
//! The result kind is fixed by the operator's enum variant. Nothing accepts a
//! result kind as a parameter, so a node such as "`Less` producing an int"
//! cannot be written down.

use crate::value::{Kind, Value};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Failure applying an arithmetic operator to two in-range operands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticTrap {
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {op}")]
    Overflow { op: ArithOp },
}

/// Operand and result kinds of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub operand: Kind,
    pub result: Kind,
}

/// Int × Int → Int operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithOp {
    Plus,
    Minus,
    Times,
    Divide,
}

impl ArithOp {
    pub const SIGNATURE: Signature = Signature {
        operand: Kind::Int,
        result: Kind::Int,
    };

    /// Checked application. Division truncates toward zero.
    pub fn apply(self, lhs: i64, rhs: i64) -> Result<i64, ArithmeticTrap> {
        let result = match self {
            ArithOp::Plus => lhs.checked_add(rhs),
            ArithOp::Minus => lhs.checked_sub(rhs),
            ArithOp::Times => lhs.checked_mul(rhs),
            ArithOp::Divide => {
                if rhs == 0 {
                    return Err(ArithmeticTrap::DivisionByZero);
                }
                lhs.checked_div(rhs)
            }
        };
        result.ok_or(ArithmeticTrap::Overflow { op: self })
    }

    pub fn name(self) -> &'static str {
        match self {
            ArithOp::Plus => "Plus",
            ArithOp::Minus => "Minus",
            ArithOp::Times => "Times",
            ArithOp::Divide => "Divide",
        }
    }
}

/// Int × Int → Bool operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOp {
    Less,
    Equal,
}

impl CmpOp {
    pub const SIGNATURE: Signature = Signature {
        operand: Kind::Int,
        result: Kind::Bool,
    };

    pub fn apply(self, lhs: i64, rhs: i64) -> bool {
        match self {
            CmpOp::Less => lhs < rhs,
            CmpOp::Equal => lhs == rhs,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CmpOp::Less => "Less",
            CmpOp::Equal => "Equal",
        }
    }
}

/// Any binary operator a [`Binary`](crate::ast::Expr::Binary) node can carry.
///
/// Serialized as the bare operator name (`"Plus"`, `"Less"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum BinOp {
    Arith(ArithOp),
    Compare(CmpOp),
}

impl BinOp {
    /// Every operator in the table.
    pub const ALL: [BinOp; 6] = [
        BinOp::Arith(ArithOp::Plus),
        BinOp::Arith(ArithOp::Minus),
        BinOp::Arith(ArithOp::Times),
        BinOp::Arith(ArithOp::Divide),
        BinOp::Compare(CmpOp::Less),
        BinOp::Compare(CmpOp::Equal),
    ];

    const NAMES: [&'static str; 6] = ["Plus", "Minus", "Times", "Divide", "Less", "Equal"];

    /// Look an operator up by its printed name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    pub fn signature(self) -> Signature {
        match self {
            BinOp::Arith(_) => ArithOp::SIGNATURE,
            BinOp::Compare(_) => CmpOp::SIGNATURE,
        }
    }

    /// Tag used by the printer, e.g. `Plus`.
    pub fn name(self) -> &'static str {
        match self {
            BinOp::Arith(op) => op.name(),
            BinOp::Compare(op) => op.name(),
        }
    }

    /// Apply to two already-extracted integer operands.
    pub fn apply(self, lhs: i64, rhs: i64) -> Result<Value, ArithmeticTrap> {
        match self {
            BinOp::Arith(op) => op.apply(lhs, rhs).map(Value::Int),
            BinOp::Compare(op) => Ok(Value::Bool(op.apply(lhs, rhs))),
        }
    }
}

impl<'de> Deserialize<'de> for BinOp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        BinOp::from_name(&name)
            .ok_or_else(|| serde::de::Error::unknown_variant(&name, &BinOp::NAMES))
    }
}

impl From<ArithOp> for BinOp {
    fn from(op: ArithOp) -> Self {
        BinOp::Arith(op)
    }
}

impl From<CmpOp> for BinOp {
    fn from(op: CmpOp) -> Self {
        BinOp::Compare(op)
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
