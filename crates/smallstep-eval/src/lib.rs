//! smallstep reduction engine.
//!
//! Executes smallstep programs one transition at a time against a mutable
//! [`Heap`]. [`step`] and [`is_normal_form`] are everything a driver needs;
//! [`Trace`] and [`run`] are the drivers this crate ships.

mod driver;
mod error;
mod evaluator;
mod heap;

pub use driver::{run, run_with_gas_limit, Trace, DEFAULT_GAS_LIMIT};
pub use error::{EvalError, EvalResult};
pub use evaluator::{is_normal_form, step, Evaluator};
pub use heap::Heap;
