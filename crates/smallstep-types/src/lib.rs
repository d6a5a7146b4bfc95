//! Shared types for smallstep.
//!
//! This crate defines the expression tree, the operator table and the
//! normal-form values that the reduction engine and its drivers exchange.

pub mod ast;
mod op;
mod value;

pub use op::{ArithOp, ArithmeticTrap, BinOp, CmpOp, Signature};
pub use value::{Kind, Value};
