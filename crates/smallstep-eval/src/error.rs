//! Runtime error types for the smallstep evaluator.

use smallstep_types::{ArithmeticTrap, Kind, Value};
use thiserror::Error;

/// Evaluation error: unbound names, kind mismatches, traps and gas exhaustion.
///
/// A failing step never leaves a partial heap mutation behind. The only
/// mutation is an assignment commit, and that happens only once the assigned
/// value is already in normal form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Lookup of a name that has never been assigned.
    #[error("unbound variable: {0}")]
    UnboundVariable(String),

    /// A value of the wrong kind reached an operator or a condition.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    /// Division by zero or integer overflow.
    #[error("arithmetic trap: {0}")]
    ArithmeticTrap(#[from] ArithmeticTrap),

    /// `step` was called on a value. Only a broken driver gets here.
    #[error("internal error: no transition from normal form {0}")]
    InvalidStepOnNormalForm(Value),

    /// The step budget ran out before a normal form was reached.
    #[error("gas exhausted after {limit} steps")]
    GasExhausted { limit: u64 },
}

impl EvalError {
    /// True for errors that indicate misuse of the engine rather than a
    /// fault in the program being run.
    pub fn is_internal(&self) -> bool {
        matches!(self, EvalError::InvalidStepOnNormalForm(_))
    }
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
