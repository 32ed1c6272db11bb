//! Assessment CLI
//!
//! Thin wrapper around anthro_core: register trainers, fit the models from
//! a historical CSV, and run one submission through the pipeline.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use anthro_core::{
    append_record, football_positions, recommended_sports, GrowthModelConfig, GrowthPredictor,
    HistoricalDataset, RatingThresholds, RecordPipeline, SportClassifier, Submission,
    TrainedClassifier, TrainedClassifierConfig, TrainerRegistry, WebhookNotifier,
};

#[derive(Parser)]
#[command(name = "anthro")]
#[command(about = "Youth athlete anthropometric assessment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ClassifierKind {
    /// Football position threshold ladder
    Positions,
    /// General sport threshold ladder
    Sports,
    /// Forest classifier trained on the sport ladder's labels
    TrainedSports,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a trainer email in the local registry
    Register {
        /// Trainer email address
        #[arg(long)]
        email: String,

        /// Registry JSON file
        #[arg(long, default_value = "trainers.json")]
        registry: PathBuf,
    },

    /// Assess one submission and append the result to the output CSV
    Assess {
        /// Submission JSON file
        #[arg(long)]
        input: PathBuf,

        /// Historical dataset CSV used to fit the models
        #[arg(long)]
        dataset: PathBuf,

        /// Output CSV the record is appended to
        #[arg(long, default_value = "assessments.csv")]
        out: PathBuf,

        /// Registry JSON file; the submission's trainer must be registered
        #[arg(long, default_value = "trainers.json")]
        registry: PathBuf,

        /// Classification strategy
        #[arg(long, value_enum, default_value = "positions")]
        classifier: ClassifierKind,

        /// Optional webhook URL notified with the record, best effort
        #[arg(long)]
        webhook: Option<String>,

        /// Model seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Fit the models and print a training summary
    TrainReport {
        /// Historical dataset CSV
        #[arg(long)]
        dataset: PathBuf,

        /// Model seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Register { email, registry } => run_register(&email, &registry),
        Commands::Assess {
            input,
            dataset,
            out,
            registry,
            classifier,
            webhook,
            seed,
        } => run_assess(&input, &dataset, &out, &registry, classifier, webhook, seed),
        Commands::TrainReport { dataset, seed } => run_train_report(&dataset, seed),
    }
}

fn run_register(email: &str, registry_path: &PathBuf) -> Result<()> {
    let mut registry = TrainerRegistry::load(registry_path)
        .with_context(|| format!("loading registry {}", registry_path.display()))?;
    if registry.register(email)? {
        println!("Registered {email}");
    } else {
        println!("{email} was already registered");
    }
    Ok(())
}

fn run_assess(
    input: &PathBuf,
    dataset_path: &PathBuf,
    out: &PathBuf,
    registry_path: &PathBuf,
    classifier: ClassifierKind,
    webhook: Option<String>,
    seed: u64,
) -> Result<()> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("reading submission {}", input.display()))?;
    let submission: Submission =
        serde_json::from_str(&raw).context("parsing submission JSON")?;

    let registry = TrainerRegistry::load(registry_path)?;
    if !registry.is_registered(&submission.trainer_email) {
        bail!(
            "trainer {} is not registered; run `anthro register --email {}` first",
            submission.trainer_email,
            submission.trainer_email
        );
    }

    let (dataset, stats) = HistoricalDataset::load_csv(dataset_path)
        .with_context(|| format!("loading dataset {}", dataset_path.display()))?;
    println!(
        "Dataset: {} rows ({} skipped)",
        stats.parsed, stats.failed
    );

    let growth_config = GrowthModelConfig {
        model_seed: seed,
        ..GrowthModelConfig::default()
    };

    let classifier: Box<dyn SportClassifier + Send + Sync> = match classifier {
        ClassifierKind::Positions => Box::new(football_positions()),
        ClassifierKind::Sports => Box::new(recommended_sports()),
        ClassifierKind::TrainedSports => {
            let config = TrainedClassifierConfig {
                seed,
                ..TrainedClassifierConfig::default()
            };
            Box::new(TrainedClassifier::fit(
                &dataset,
                &recommended_sports(),
                &config,
            )?)
        }
    };

    let pipeline = RecordPipeline::from_dataset(
        &dataset,
        &growth_config,
        classifier,
        RatingThresholds::default(),
    )?;
    let record = pipeline.assess(submission)?;

    println!("Predicted height at 18: {:.2} m", record.predicted_height_18_m);
    println!("Expected growth:        {:+.2} m", record.expected_growth_m);
    println!("Recommendation:         {}", record.recommended_label);
    println!("Rating:                 {}", record.rating);
    if !record.weak_areas.is_empty() {
        println!("Weak areas:             {}", record.weak_areas);
    }

    append_record(out, &record)
        .with_context(|| format!("appending to {}", out.display()))?;
    println!("Appended record {} to {}", record.id, out.display());

    if let Some(url) = webhook {
        // Best effort by contract: failures are logged inside and ignored
        WebhookNotifier::new(url).notify(&record);
    }

    Ok(())
}

fn run_train_report(dataset_path: &PathBuf, seed: u64) -> Result<()> {
    let (dataset, stats) = HistoricalDataset::load_csv(dataset_path)
        .with_context(|| format!("loading dataset {}", dataset_path.display()))?;
    println!(
        "Dataset: {} rows parsed, {} skipped",
        stats.parsed, stats.failed
    );

    let growth_config = GrowthModelConfig {
        model_seed: seed,
        ..GrowthModelConfig::default()
    };
    GrowthPredictor::fit(&dataset, &growth_config)?;
    println!("Growth model fitted on {} samples", dataset.len());

    let ladder = recommended_sports();
    let config = TrainedClassifierConfig {
        seed,
        ..TrainedClassifierConfig::default()
    };
    let model = TrainedClassifier::fit(&dataset, &ladder, &config)?;
    println!("Sport classifier labels: {}", model.labels().join(", "));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
