//! CLI error types.

use smallstep_eval::EvalError;
use std::path::PathBuf;
use thiserror::Error;

/// Anything that stops the CLI from producing a final value.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid program in {path}: {source}")]
    Program {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write output: {0}")]
    Write(#[from] std::io::Error),

    #[error("cannot encode report: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Eval(#[from] EvalError),
}
