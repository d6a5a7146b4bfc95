//! Driving a program to its final value.
//!
//! [`Trace`] repeatedly applies one external step and yields every
//! intermediate program state, which is what a tracing front end prints.
//! The heap is mutated in place, so a trace cannot be resumed from an
//! earlier state without also restoring the heap as it was at that point.

use crate::error::{EvalError, EvalResult};
use crate::evaluator::Evaluator;
use crate::heap::Heap;
use smallstep_types::ast::Expr;
use smallstep_types::Value;
use std::iter::FusedIterator;
use tracing::debug;

/// Step budget used by the driver entry points unless told otherwise.
pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;

/// Iterator over the states a program passes through.
///
/// Yields the expression produced by each external step. Ends after the
/// first normal form, or after yielding the first error.
pub struct Trace<'h> {
    eval: Evaluator<'h>,
    current: Expr,
    steps: usize,
    failure: Option<EvalError>,
}

impl<'h> Trace<'h> {
    pub fn new(program: Expr, heap: &'h mut Heap) -> Self {
        Self::with_gas_limit(program, heap, DEFAULT_GAS_LIMIT)
    }

    pub fn with_gas_limit(program: Expr, heap: &'h mut Heap, gas_limit: u64) -> Self {
        Self {
            eval: Evaluator::with_gas_limit(heap, gas_limit),
            current: program,
            steps: 0,
            failure: None,
        }
    }

    /// The most recent state.
    pub fn current(&self) -> &Expr {
        &self.current
    }

    pub fn heap(&self) -> &Heap {
        self.eval.heap()
    }

    /// External steps taken so far.
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// Transitions taken so far, including those inside a single external
    /// step.
    pub fn gas_used(&self) -> u64 {
        self.eval.gas_used()
    }

    /// Run the remaining steps and return the final value.
    ///
    /// Once a step has failed, the trace is stuck and keeps returning
    /// that error.
    pub fn finish(&mut self) -> EvalResult<Value> {
        if let Some(e) = &self.failure {
            return Err(e.clone());
        }
        loop {
            if let Some(value) = self.current.as_value() {
                debug!(steps = self.steps, gas = self.gas_used(), %value, "finished");
                return Ok(value);
            }
            self.advance()?;
        }
    }

    fn advance(&mut self) -> EvalResult<()> {
        match self.eval.step(&self.current) {
            Ok(next) => {
                self.current = next;
                self.steps += 1;
                Ok(())
            }
            Err(e) => {
                self.failure = Some(e.clone());
                Err(e)
            }
        }
    }
}

impl Iterator for Trace<'_> {
    type Item = EvalResult<Expr>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failure.is_some() || self.current.is_normal_form() {
            return None;
        }
        Some(self.advance().map(|()| self.current.clone()))
    }
}

impl FusedIterator for Trace<'_> {}

/// Drive `program` to a value with the default step budget.
pub fn run(program: &Expr, heap: &mut Heap) -> EvalResult<Value> {
    run_with_gas_limit(program, heap, DEFAULT_GAS_LIMIT)
}

/// Drive `program` to a value, failing with `GasExhausted` after
/// `gas_limit` transitions.
pub fn run_with_gas_limit(program: &Expr, heap: &mut Heap, gas_limit: u64) -> EvalResult<Value> {
    Trace::with_gas_limit(program.clone(), heap, gas_limit).finish()
}
