//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::classifier::types::PredictOutput;
use crate::cli::args::{OutputFormat, SagarisArgs};
use crate::error::Result;

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingResult {
    pub model_path: String,
    pub intents: usize,
    pub utterances: usize,
    pub oos_scorer_trained: bool,
    pub duration_ms: u64,
}

/// Print a training result in the requested format.
pub fn print_training_result(result: &TrainingResult, args: &SagarisArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => print_json(result, args.pretty)?,
        OutputFormat::Human => {
            println!("Model written to {}", result.model_path);
            println!(
                "Trained on {} intents ({} utterances) in {} ms",
                result.intents, result.utterances, result.duration_ms
            );
            if !result.oos_scorer_trained {
                println!("Out-of-scope scorer was skipped for this language");
            }
        }
    }
    Ok(())
}

/// Print a prediction in the requested format.
pub fn print_prediction(output: &PredictOutput, args: &SagarisArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => print_json(output, args.pretty)?,
        OutputFormat::Human => {
            for (rank, entry) in output.intents.iter().enumerate() {
                println!("{:2}. {:<24} {:.4}", rank + 1, entry.intent, entry.confidence);
            }
            println!("    {:<24} {:.4}", "(out of scope)", output.oos);
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
