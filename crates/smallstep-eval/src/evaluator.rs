//! The one-step transition function.
//!
//! Step granularity is not uniform across node kinds:
//!
//! - `Var`, `Binary` and `While` advance by exactly one transition.
//! - `If` drives its condition and then the selected branch to normal form
//!   and returns the branch's value.
//! - `Seq` and `Assign` drive their first statement (resp. right-hand side)
//!   to normal form and return a node that collapses or commits on the
//!   *next* external step.
//!
//! A driver therefore sees fewer states than the number of micro-steps that
//! actually ran. Gas counts micro-steps, so a diverging loop buried inside a
//! single external step still runs out.

use crate::error::{EvalError, EvalResult};
use crate::heap::Heap;
use smallstep_types::ast::Expr;
use smallstep_types::{BinOp, Kind, Value};
use tracing::{debug, trace, warn};

/// Reduction engine bound to one heap.
pub struct Evaluator<'h> {
    heap: &'h mut Heap,
    /// Transitions taken so far, internal ones included.
    gas: u64,
    gas_limit: u64,
}

impl<'h> Evaluator<'h> {
    /// Create an evaluator with no step budget.
    pub fn new(heap: &'h mut Heap) -> Self {
        Self::with_gas_limit(heap, u64::MAX)
    }

    /// Create an evaluator that fails with `GasExhausted` after `gas_limit`
    /// transitions.
    pub fn with_gas_limit(heap: &'h mut Heap, gas_limit: u64) -> Self {
        Self {
            heap,
            gas: 0,
            gas_limit,
        }
    }

    pub fn heap(&self) -> &Heap {
        &*self.heap
    }

    pub fn gas_used(&self) -> u64 {
        self.gas
    }

    fn tick(&mut self) -> EvalResult<()> {
        if self.gas >= self.gas_limit {
            warn!(limit = self.gas_limit, "gas exhausted");
            return Err(EvalError::GasExhausted {
                limit: self.gas_limit,
            });
        }
        self.gas += 1;
        Ok(())
    }

    // ══════════════════════════════════════════════════════════════════════
    // Transition
    // ══════════════════════════════════════════════════════════════════════

    /// Perform one transition of `expr`.
    ///
    /// Calling this on a normal form fails with `InvalidStepOnNormalForm`.
    pub fn step(&mut self, expr: &Expr) -> EvalResult<Expr> {
        if let Some(value) = expr.as_value() {
            return Err(EvalError::InvalidStepOnNormalForm(value));
        }
        self.tick()?;
        trace!(node = expr.tag(), gas = self.gas, "step");
        match expr {
            Expr::Int(_) | Expr::Bool(_) | Expr::Skip => unreachable!("handled above"),
            Expr::Var(name) => self.step_var(name),
            Expr::Binary { op, left, right } => self.step_binary(*op, left, right),
            Expr::If {
                cond,
                then_branch,
                else_branch,
            } => self.step_if(cond, then_branch, else_branch),
            Expr::Seq { first, second } => self.step_seq(first, second),
            Expr::While { cond, body } => Ok(unroll(cond, body)),
            Expr::Assign { name, value } => self.step_assign(name, value),
        }
    }

    /// Apply transitions until `expr` reaches a normal form.
    pub fn normalize(&mut self, expr: &Expr) -> EvalResult<Value> {
        let mut current = expr.clone();
        loop {
            if let Some(value) = current.as_value() {
                return Ok(value);
            }
            current = match &current {
                // Continue with the selected branch in place so that loops
                // run in constant stack.
                Expr::If {
                    cond,
                    then_branch,
                    else_branch,
                } => {
                    self.tick()?;
                    trace!(node = "If", gas = self.gas, "step");
                    self.select(cond, then_branch, else_branch)?.clone()
                }
                other => self.step(other)?,
            };
        }
    }

    // ── Variables ────────────────────────────────────────────────────────

    fn step_var(&self, name: &str) -> EvalResult<Expr> {
        self.heap
            .get(name)
            .map(Expr::from)
            .ok_or_else(|| EvalError::UnboundVariable(name.to_string()))
    }

    // ── Operators ────────────────────────────────────────────────────────

    /// Leftmost-innermost: reduce the left operand first, then the right,
    /// then apply.
    fn step_binary(&mut self, op: BinOp, left: &Expr, right: &Expr) -> EvalResult<Expr> {
        match (left.as_value(), right.as_value()) {
            (Some(lv), Some(rv)) => {
                let operand = op.signature().operand;
                let lhs = expect_int(lv, operand)?;
                let rhs = expect_int(rv, operand)?;
                Ok(Expr::from(op.apply(lhs, rhs)?))
            }
            (Some(lv), None) => Ok(Expr::binary(op, Expr::from(lv), self.step(right)?)),
            (None, _) => Ok(Expr::binary(op, self.step(left)?, right.clone())),
        }
    }

    // ── Control flow ─────────────────────────────────────────────────────

    /// Only the selected branch is ever evaluated.
    fn step_if(&mut self, cond: &Expr, then_branch: &Expr, else_branch: &Expr) -> EvalResult<Expr> {
        let branch = self.select(cond, then_branch, else_branch)?;
        Ok(Expr::from(self.normalize(branch)?))
    }

    /// Drive the condition to a boolean and pick the branch it names.
    fn select<'e>(
        &mut self,
        cond: &Expr,
        then_branch: &'e Expr,
        else_branch: &'e Expr,
    ) -> EvalResult<&'e Expr> {
        let taken = self
            .normalize(cond)?
            .as_bool()
            .map_err(|found| EvalError::TypeMismatch {
                expected: Kind::Bool,
                found,
            })?;
        Ok(if taken { then_branch } else { else_branch })
    }

    fn step_seq(&mut self, first: &Expr, second: &Expr) -> EvalResult<Expr> {
        if first.is_normal_form() {
            return Ok(second.clone());
        }
        let done = self.normalize(first)?;
        Ok(Expr::seq(Expr::from(done), second.clone()))
    }

    fn step_assign(&mut self, name: &str, value: &Expr) -> EvalResult<Expr> {
        match value.as_value() {
            Some(v) => {
                let previous = self.heap.assign(name, v);
                debug!(var = name, value = %v, previous = ?previous, "assign");
                Ok(Expr::Skip)
            }
            None => {
                let v = self.normalize(value)?;
                Ok(Expr::assign(name, Expr::from(v)))
            }
        }
    }
}

/// `While(c, b)` → `If(c, Seq(b, While(c, b)), Skip)`.
fn unroll(cond: &Expr, body: &Expr) -> Expr {
    debug!(cond = %cond, "unroll loop");
    Expr::if_then_else(
        cond.clone(),
        Expr::seq(body.clone(), Expr::while_loop(cond.clone(), body.clone())),
        Expr::Skip,
    )
}

fn expect_int(value: Value, expected: Kind) -> EvalResult<i64> {
    value
        .as_int()
        .map_err(|found| EvalError::TypeMismatch { expected, found })
}

// ══════════════════════════════════════════════════════════════════════════════
// Driver contract
// ══════════════════════════════════════════════════════════════════════════════

/// True iff `expr` is `Int`, `Bool` or `Skip`.
pub fn is_normal_form(expr: &Expr) -> bool {
    expr.is_normal_form()
}

/// One transition of `expr` against `heap`, with no step budget.
pub fn step(expr: &Expr, heap: &mut Heap) -> EvalResult<Expr> {
    Evaluator::new(heap).step(expr)
}
