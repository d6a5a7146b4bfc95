//! Rendering a run as text or JSON.

use crate::error::CliError;
use serde::Serialize;
use smallstep_eval::{EvalResult, Heap, Trace};
use smallstep_types::ast::Expr;
use smallstep_types::Value;
use std::io::Write;

/// Print the program, the initial heap, every state that still reduces and
/// the final value.
///
/// ```text
/// (Plus (Var a),(Int 1))
/// Var a = (Int 2)
/// ===> (Plus (Var a),(Int 1))
/// ===> (Plus (Int 2),(Int 1))
/// (Int 3)
/// ```
pub fn text(
    out: &mut impl Write,
    program: Expr,
    heap: &mut Heap,
    gas_limit: u64,
    quiet: bool,
) -> Result<Value, CliError> {
    if !quiet {
        writeln!(out, "{program}")?;
        for (name, value) in heap.iter() {
            writeln!(out, "Var {name} = {value}")?;
        }
    }
    let mut trace = Trace::with_gas_limit(program, heap, gas_limit);
    while !trace.current().is_normal_form() {
        if !quiet {
            writeln!(out, "===> {}", trace.current())?;
        }
        if let Some(Err(e)) = trace.next() {
            return Err(e.into());
        }
    }
    let result = trace.finish()?;
    writeln!(out, "{result}")?;
    Ok(result)
}

/// Everything a run produced, in one document.
#[derive(Debug, Serialize)]
pub struct Report {
    pub program: Expr,
    pub heap: Heap,
    pub trace: Vec<Expr>,
    pub steps: usize,
    pub gas_used: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub final_heap: Heap,
}

impl Report {
    /// Run `program` to completion, recording every state.
    pub fn collect(program: Expr, heap: &mut Heap, gas_limit: u64) -> (Self, EvalResult<Value>) {
        let initial = heap.clone();
        let mut trace = Trace::with_gas_limit(program.clone(), heap, gas_limit);
        let states: Vec<Expr> = trace.by_ref().filter_map(Result::ok).collect();
        let outcome = trace.finish();
        let report = Self {
            program,
            heap: initial,
            trace: states,
            steps: trace.steps_taken(),
            gas_used: trace.gas_used(),
            result: outcome.as_ref().ok().copied(),
            error: outcome.as_ref().err().map(ToString::to_string),
            final_heap: trace.heap().clone(),
        };
        (report, outcome)
    }
}

/// Write the run as a single JSON document.
///
/// The document is written even when evaluation fails; the failure is then
/// also returned so the process can exit non-zero.
pub fn json(
    out: &mut impl Write,
    program: Expr,
    heap: &mut Heap,
    gas_limit: u64,
    quiet: bool,
) -> Result<Value, CliError> {
    let (report, outcome) = Report::collect(program, heap, gas_limit);
    if quiet {
        serde_json::to_writer(&mut *out, &report.result)?;
    } else {
        serde_json::to_writer_pretty(&mut *out, &report)?;
    }
    writeln!(out)?;
    Ok(outcome?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_layout_matches_trace_format() {
        let mut out = Vec::new();
        let mut heap = Heap::with_bindings([("a", Value::Int(2))]);
        let program = Expr::plus(Expr::var("a"), Expr::int(1));
        let result = text(&mut out, program, &mut heap, 100, false).unwrap();
        assert_eq!(result, Value::Int(3));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "(Plus (Var a),(Int 1))\n\
             Var a = (Int 2)\n\
             ===> (Plus (Var a),(Int 1))\n\
             ===> (Plus (Int 2),(Int 1))\n\
             (Int 3)\n"
        );
    }

    #[test]
    fn text_prints_value_program_once() {
        let mut out = Vec::new();
        let mut heap = Heap::new();
        text(&mut out, Expr::int(7), &mut heap, 10, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "(Int 7)\n(Int 7)\n");
    }

    #[test]
    fn sample_text_trace() {
        let mut out = Vec::new();
        let mut heap = sample::heap();
        text(&mut out, sample::program(), &mut heap, 1_000, false).unwrap();
        let printed = String::from_utf8(out).unwrap();
        let arrows: Vec<&str> = printed.lines().filter(|l| l.starts_with("===> ")).collect();
        assert_eq!(arrows.len(), 5);
        assert_eq!(arrows[0], format!("===> {}", sample::program()));
        assert_eq!(arrows[4], "===> (Var d)");
        assert!(printed.ends_with("(Var d)\n(Int 10)\n"));
    }

    #[test]
    fn quiet_text_prints_only_result() {
        let mut out = Vec::new();
        let mut heap = sample::heap();
        text(&mut out, sample::program(), &mut heap, 1_000, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "(Int 10)\n");
    }

    #[test]
    fn text_reports_error_after_partial_trace() {
        let mut out = Vec::new();
        let mut heap = Heap::new();
        let program = Expr::seq(Expr::assign("x", Expr::int(1)), Expr::var("y"));
        let err = text(&mut out, program, &mut heap, 100, false).unwrap_err();
        assert!(matches!(err, CliError::Eval(_)));
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("===> (Seq (Assign x,(Int 1)),(Var y))\n"));
        assert!(printed.ends_with("===> (Var y)\n"));
        assert_eq!(heap.get("x"), Some(Value::Int(1)));
    }

    #[test]
    fn report_for_sample() {
        let mut heap = sample::heap();
        let (report, outcome) = Report::collect(sample::program(), &mut heap, 1_000);
        assert_eq!(outcome, Ok(Value::Int(10)));
        assert_eq!(report.steps, 5);
        assert_eq!(report.result, Some(Value::Int(10)));
        assert_eq!(report.error, None);
        assert_eq!(report.heap.get("d"), Some(Value::Int(0)));
        assert_eq!(report.final_heap.get("d"), Some(Value::Int(10)));
    }

    #[test]
    fn json_report_keeps_error_text() {
        let mut out = Vec::new();
        let mut heap = Heap::new();
        let err = json(&mut out, Expr::var("z"), &mut heap, 100, false).unwrap_err();
        assert!(matches!(err, CliError::Eval(_)));
        let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc["error"], "unbound variable: z");
        assert!(doc.get("result").is_none());
    }
}
