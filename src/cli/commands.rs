//! Command implementations for the Sagaris CLI.

use std::fs;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::analysis::Language;
use crate::analysis::tokenizer::{RegexUtteranceBuilder, UtteranceBuilder};
use crate::classifier::orchestrator::OosAwareClassifier;
use crate::classifier::types::{EntityDefs, Intent, TrainInput};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;

/// On-disk training dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Language code for the whole dataset.
    pub language: String,
    /// Intent definitions.
    pub intents: Vec<DatasetIntent>,
    /// Entity definitions.
    #[serde(default)]
    pub entities: EntityDefs,
    /// Default training seed.
    #[serde(default)]
    pub seed: u64,
}

/// One intent in a training dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetIntent {
    pub name: String,
    pub utterances: Vec<String>,
    #[serde(default)]
    pub contexts: Vec<String>,
    #[serde(default)]
    pub slots: Vec<String>,
}

/// Execute a CLI command.
pub fn execute_command(args: SagarisArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args.clone(), &args),
        Command::Predict(predict_args) => predict(predict_args.clone(), &args),
    }
}

/// Train a classifier from a dataset file.
fn train(args: TrainArgs, cli_args: &SagarisArgs) -> Result<()> {
    if cli_args.verbosity() > 0 {
        println!("Loading dataset from: {}", args.data.display());
    }
    let dataset: Dataset = serde_json::from_str(&fs::read_to_string(&args.data)?)?;
    let language = Language::new(&dataset.language);
    let seed = args.seed.unwrap_or(dataset.seed);

    let builder = RegexUtteranceBuilder::new()?;
    let intents: Result<Vec<Intent>> = dataset
        .intents
        .iter()
        .map(|intent| {
            let utterances = builder.build_batch(&intent.utterances, &language)?;
            Ok(Intent {
                name: intent.name.clone(),
                utterances,
                contexts: intent.contexts.clone(),
                slot_names: intent.slots.clone(),
            })
        })
        .collect();
    let intents = intents?;
    let utterance_count: usize = intents.iter().map(|i| i.utterances.len()).sum();

    let input = TrainInput::new(language, intents, seed, dataset.entities.clone());
    let mut classifier = OosAwareClassifier::with_defaults();

    let start = Instant::now();
    let verbose = cli_args.verbosity() > 1;
    classifier.train(&input, move |p| {
        if verbose {
            eprintln!("progress: {:.0}%", p * 100.0);
        }
    })?;

    fs::write(&args.model, classifier.serialize()?)?;

    print_training_result(
        &TrainingResult {
            model_path: args.model.display().to_string(),
            intents: input.intents.len(),
            utterances: utterance_count,
            oos_scorer_trained: classifier
                .model()
                .is_some_and(|m| m.oos_model.is_some()),
            duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Classify an utterance with a trained model.
fn predict(args: PredictArgs, cli_args: &SagarisArgs) -> Result<()> {
    let mut classifier = OosAwareClassifier::with_defaults();
    classifier.load(&fs::read_to_string(&args.model)?)?;

    let language = classifier
        .model()
        .map(|m| m.language.clone())
        .unwrap_or_else(|| Language::new("en"));
    let builder = RegexUtteranceBuilder::new()?;
    let utterance = builder
        .build_batch(&[args.text.clone()], &language)?
        .remove(0);

    let output = classifier.predict(&utterance)?;
    print_prediction(&output, cli_args)
}
