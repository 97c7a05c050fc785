//! Trains the career-domain classifier and writes the JSON artifact.
//!
//! Usage: `train-model [dataset.json] [output.json]`
//!
//! Without a dataset path the built-in sample rows are written to
//! `data/career_dataset.json` first and used for training.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use career_advisor::classifier::{sample_dataset, DomainClassifier, TrainingRow};

const DEFAULT_DATASET: &str = "data/career_dataset.json";
const DEFAULT_OUTPUT: &str = "model/career_predictor.json";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let dataset_path = args.next().map(PathBuf::from);
    let output_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let rows = match dataset_path {
        Some(path) => read_dataset(&path)?,
        None => write_sample_dataset(Path::new(DEFAULT_DATASET))?,
    };

    let classifier = DomainClassifier::train(&rows).context("Training failed")?;
    classifier
        .save(&output_path)
        .with_context(|| format!("Failed to write model to '{}'", output_path.display()))?;

    info!(path = %output_path.display(), "Model and vectorizer saved");
    Ok(())
}

fn read_dataset(path: &Path) -> Result<Vec<TrainingRow>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Dataset '{}' is not a JSON array of rows", path.display()))
}

fn write_sample_dataset(path: &Path) -> Result<Vec<TrainingRow>> {
    let rows = sample_dataset();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(&rows)?)
        .with_context(|| format!("Failed to write sample dataset '{}'", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), "Sample dataset written");
    Ok(rows)
}
