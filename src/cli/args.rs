//! Command line argument parsing for the Sagaris CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sagaris - an out-of-scope aware intent classifier
#[derive(Parser, Debug, Clone)]
#[command(name = "sagaris")]
#[command(about = "An out-of-scope aware intent classifier for Rust")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Sagaris Contributors")]
#[command(long_about = None)]
pub struct SagarisArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SagarisArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a classifier from a JSON dataset
    Train(TrainArgs),

    /// Predict the intent of an utterance
    Predict(PredictArgs),
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Path to the training dataset (JSON)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Path to write the trained model to
    #[arg(short, long)]
    pub model: PathBuf,

    /// Training seed (overrides the dataset's seed)
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the predict command
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Path to a trained model (JSON)
    #[arg(short, long)]
    pub model: PathBuf,

    /// The utterance to classify
    pub text: String,
}

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
