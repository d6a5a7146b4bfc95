//! `smallstep`: run a program and print each state it passes through.

mod args;
mod error;
mod output;
mod sample;

use args::{Args, Format};
use clap::Parser;
use error::CliError;
use smallstep_eval::Heap;
use smallstep_types::ast::Expr;
use std::process::ExitCode;
use tracing::info;

fn main() -> ExitCode {
    let args = Args::parse();

    use tracing_subscriber::{fmt, EnvFilter};

    // RUST_LOG controls the log level; default to WARN if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args) -> Result<(), CliError> {
    let (program, mut heap) = load(args)?;
    for (name, value) in &args.vars {
        heap.assign(name, *value);
    }
    info!(program = %program, bindings = heap.len(), "starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = match args.format {
        Format::Text => output::text(&mut out, program, &mut heap, args.gas_limit, args.quiet)?,
        Format::Json => output::json(&mut out, program, &mut heap, args.gas_limit, args.quiet)?,
    };
    info!(%result, "done");
    Ok(())
}

/// The program to run and the heap it starts from.
fn load(args: &Args) -> Result<(Expr, Heap), CliError> {
    let Some(path) = &args.program else {
        return Ok((sample::program(), sample::heap()));
    };
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })?;
    let program = serde_json::from_str(&source).map_err(|source| CliError::Program {
        path: path.clone(),
        source,
    })?;
    Ok((program, Heap::new()))
}
