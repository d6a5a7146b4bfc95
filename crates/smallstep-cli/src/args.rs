//! Command line options.

use clap::{Parser, ValueEnum};
use smallstep_eval::DEFAULT_GAS_LIMIT;
use smallstep_types::Value;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "smallstep")]
#[command(about = "Run a smallstep program and print every reduction step", long_about = None)]
pub struct Args {
    /// JSON file holding the program tree (defaults to the built-in sample)
    #[arg(short, long, value_name = "FILE")]
    pub program: Option<PathBuf>,

    /// Initial binding NAME=VALUE, where VALUE is an integer, true, false or skip
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    pub vars: Vec<(String, Value)>,

    /// Maximum number of transitions before giving up
    #[arg(long, default_value_t = DEFAULT_GAS_LIMIT)]
    pub gas_limit: u64,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Print only the final value
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

pub fn parse_binding(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in '{raw}'"));
    }
    let value = match value.trim() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "skip" => Value::Skip,
        other => other
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| format!("'{other}' is not an integer, true, false or skip"))?,
    };
    Ok((name.to_string(), value))
}
