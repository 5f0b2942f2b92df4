use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;
mod parsers;

#[cfg(test)]
mod tests;

pub use args::{HealthArgs, LogsArgs, ModelArgs, PredictArgs, ScoreArgs, SearchArgs};

#[derive(Debug, Parser)]
#[command(name = "carescope")]
#[command(about = "Patient prefix search and prescription risk scoring", version)]
pub struct Cli {
    /// JSONL request log; overrides CARESCOPE_REQUEST_LOG.
    #[arg(long, global = true)]
    pub request_log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Search(SearchArgs),
    Predict(PredictArgs),
    Score(ScoreArgs),
    Health(HealthArgs),
    Logs(LogsArgs),
}
