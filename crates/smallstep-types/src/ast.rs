//! Expression tree for the smallstep language.
//!
//! Programs are built directly from these nodes; there is no surface syntax.
//! Nodes are immutable once built: reduction always produces a fresh tree.
//! Composite nodes own their children through `Box`.

use crate::op::{ArithOp, BinOp, CmpOp};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A program, or one intermediate state of a running program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    // ── Normal forms ──
    /// `(Int 10)`
    Int(i64),
    /// `(Bool 1)`
    Bool(bool),
    /// `(Skip)`, the result of a statement.
    Skip,

    // ── Reducible ──
    /// `(Var a)`
    Var(String),
    /// `(Plus l,r)`, `(Less l,r)`, ...
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `(If c,t,f)`
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// `(Seq a,b)`
    Seq { first: Box<Expr>, second: Box<Expr> },
    /// `(While c,b)`
    While { cond: Box<Expr>, body: Box<Expr> },
    /// `(Assign x,e)`
    Assign { name: String, value: Box<Expr> },
}

impl Expr {
    // ── Construction ─────────────────────────────────────────────────────

    pub fn int(n: i64) -> Self {
        Expr::Int(n)
    }

    pub fn bool(b: bool) -> Self {
        Expr::Bool(b)
    }

    pub fn skip() -> Self {
        Expr::Skip
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn binary(op: impl Into<BinOp>, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op: op.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn plus(left: Expr, right: Expr) -> Self {
        Self::binary(ArithOp::Plus, left, right)
    }

    pub fn minus(left: Expr, right: Expr) -> Self {
        Self::binary(ArithOp::Minus, left, right)
    }

    pub fn times(left: Expr, right: Expr) -> Self {
        Self::binary(ArithOp::Times, left, right)
    }

    pub fn divide(left: Expr, right: Expr) -> Self {
        Self::binary(ArithOp::Divide, left, right)
    }

    pub fn less(left: Expr, right: Expr) -> Self {
        Self::binary(CmpOp::Less, left, right)
    }

    pub fn equal(left: Expr, right: Expr) -> Self {
        Self::binary(CmpOp::Equal, left, right)
    }

    pub fn if_then_else(cond: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Expr::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn seq(first: Expr, second: Expr) -> Self {
        Expr::Seq {
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    pub fn while_loop(cond: Expr, body: Expr) -> Self {
        Expr::While {
            cond: Box::new(cond),
            body: Box::new(body),
        }
    }

    pub fn assign(name: impl Into<String>, value: Expr) -> Self {
        Expr::Assign {
            name: name.into(),
            value: Box::new(value),
        }
    }

    // ── Inspection ───────────────────────────────────────────────────────

    /// True for `Int`, `Bool` and `Skip`.
    pub fn is_normal_form(&self) -> bool {
        self.as_value().is_some()
    }

    /// The value this expression denotes, if it is a normal form.
    pub fn as_value(&self) -> Option<Value> {
        match self {
            Expr::Int(n) => Some(Value::Int(*n)),
            Expr::Bool(b) => Some(Value::Bool(*b)),
            Expr::Skip => Some(Value::Skip),
            _ => None,
        }
    }

    /// Variant tag as it appears in printed form.
    pub fn tag(&self) -> &'static str {
        match self {
            Expr::Int(_) => "Int",
            Expr::Bool(_) => "Bool",
            Expr::Skip => "Skip",
            Expr::Var(_) => "Var",
            Expr::Binary { op, .. } => op.name(),
            Expr::If { .. } => "If",
            Expr::Seq { .. } => "Seq",
            Expr::While { .. } => "While",
            Expr::Assign { .. } => "Assign",
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        match value {
            Value::Int(n) => Expr::Int(n),
            Value::Bool(b) => Expr::Bool(b),
            Value::Skip => Expr::Skip,
        }
    }
}

/// Parenthesized prefix form: `(Times (Minus (Var a),(Int 10)),(Int 32))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int(n) => fmt::Display::fmt(&Value::Int(*n), f),
            Expr::Bool(b) => fmt::Display::fmt(&Value::Bool(*b), f),
            Expr::Skip => fmt::Display::fmt(&Value::Skip, f),
            Expr::Var(name) => write!(f, "(Var {name})"),
            Expr::Binary { op, left, right } => write!(f, "({op} {left},{right})"),
            Expr::If {
                cond,
                then_branch,
                else_branch,
            } => write!(f, "(If {cond},{then_branch},{else_branch})"),
            Expr::Seq { first, second } => write!(f, "(Seq {first},{second})"),
            Expr::While { cond, body } => write!(f, "(While {cond},{body})"),
            Expr::Assign { name, value } => write!(f, "(Assign {name},{value})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_literals_and_skip_are_normal() {
        assert!(Expr::int(1).is_normal_form());
        assert!(Expr::bool(false).is_normal_form());
        assert!(Expr::skip().is_normal_form());
        assert!(!Expr::var("x").is_normal_form());
        assert!(!Expr::plus(Expr::int(1), Expr::int(2)).is_normal_form());
        assert!(!Expr::seq(Expr::skip(), Expr::skip()).is_normal_form());
        assert!(!Expr::while_loop(Expr::bool(false), Expr::skip()).is_normal_form());
        assert!(!Expr::assign("x", Expr::int(1)).is_normal_form());
    }

    #[test]
    fn value_round_trips_through_expr() {
        for v in [Value::Int(7), Value::Bool(true), Value::Skip] {
            assert_eq!(Expr::from(v).as_value(), Some(v));
        }
    }

    #[test]
    fn prints_prefix_form() {
        let e = Expr::plus(Expr::var("a"), Expr::int(10));
        assert_eq!(e.to_string(), "(Plus (Var a),(Int 10))");

        let w = Expr::while_loop(
            Expr::less(Expr::var("d"), Expr::int(5)),
            Expr::assign("d", Expr::int(11)),
        );
        assert_eq!(
            w.to_string(),
            "(While (Less (Var d),(Int 5)),(Assign d,(Int 11)))"
        );
    }

    #[test]
    fn tag_names_operator() {
        assert_eq!(Expr::divide(Expr::int(1), Expr::int(1)).tag(), "Divide");
        assert_eq!(Expr::equal(Expr::int(1), Expr::int(1)).tag(), "Equal");
        assert_eq!(Expr::var("x").tag(), "Var");
    }
}
