//! Offline training CLI.
//!
//! Fits the scaler and the severity regressor from a feature CSV when one is
//! available, otherwise from a seeded synthetic set, reports fit quality, and
//! persists the artifact atomically to the models directory.

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use symtrack::application::ml::ModelArtifact;
use symtrack::application::ml::predictor::{PredictorState, TrainOptions, r_squared};
use symtrack::application::ml::scaler::ScalerState;
use symtrack::application::ml::synthetic;
use symtrack::domain::feature_registry::FEATURE_NAMES;
use symtrack::infrastructure::model_store::ModelStore;

/// One labeled training row. Column order matches the feature registry.
#[derive(Debug, Deserialize)]
struct TrainingRecord {
    severity: f64,
    day_of_week: f64,
    has_mood: f64,
    symptom_type_code: f64,
    target_severity: f64,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to training data CSV. Falls back to synthetic data when absent.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output directory for the model artifact
    #[arg(long, default_value = "models")]
    models_dir: PathBuf,

    /// Synthetic training set size (ignored when --input is given)
    #[arg(long, default_value_t = 1000)]
    samples: usize,

    /// RNG seed for synthetic data and forest construction
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of trees in the random forest
    #[arg(long, default_value_t = 100)]
    n_trees: usize,

    /// Maximum depth of trees
    #[arg(long, default_value_t = 10)]
    max_depth: u16,

    /// Minimum samples required to split an internal node
    #[arg(long, default_value_t = 5)]
    min_split: usize,

    /// Disable the 80/20 train/test split (train on 100% of data)
    #[arg(long)]
    no_split: bool,
}

fn load_csv(path: &PathBuf) -> Result<(Vec<Vec<f64>>, Vec<f64>)> {
    let file = File::open(path).with_context(|| format!("Failed to open {path:?}"))?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(file));

    let mut x: Vec<Vec<f64>> = Vec::new();
    let mut y: Vec<f64> = Vec::new();

    for result in rdr.deserialize() {
        let record: TrainingRecord = result.context("Malformed training row")?;
        x.push(vec![
            record.severity,
            record.day_of_week,
            record.has_mood,
            record.symptom_type_code,
        ]);
        y.push(record.target_severity);
    }

    Ok((x, y))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (x, y) = match &args.input {
        Some(path) => {
            println!("Loading training data from {path:?}");
            load_csv(path)?
        }
        None => {
            println!(
                "No input CSV given. Generating {} synthetic samples (seed {})",
                args.samples, args.seed
            );
            synthetic::generate(args.samples, args.seed)
        }
    };

    if x.is_empty() {
        bail!("No training rows found");
    }

    let n = x.len();
    println!("Features ({}): {}", FEATURE_NAMES.len(), FEATURE_NAMES.join(", "));

    let split = if args.no_split {
        n
    } else {
        (n as f64 * 0.8).floor() as usize
    };
    let (x_train, y_train) = (&x[..split], &y[..split]);
    let (x_test, y_test) = (&x[split..], &y[split..]);

    println!(
        "Training Random Forest Regressor on {} samples (Trees: {}, Depth: {}, MinSplit: {})...",
        x_train.len(),
        args.n_trees,
        args.max_depth,
        args.min_split
    );

    let scaler = ScalerState::fit(x_train)?;
    let scaled_train = scaler.transform_batch(x_train)?;

    let opts = TrainOptions {
        n_trees: args.n_trees,
        max_depth: args.max_depth,
        min_samples_split: args.min_split,
        seed: args.seed,
    };
    let predictor = PredictorState::fit(&scaled_train, y_train, opts)?;
    println!("Train R²: {:.3}", predictor.r2);

    if !x_test.is_empty() {
        let mut predictions = Vec::with_capacity(x_test.len());
        for row in x_test {
            let scaled = scaler.transform(row)?;
            predictions.push(predictor.predict(&scaled)?);
        }

        let sq_err: f64 = predictions
            .iter()
            .zip(y_test)
            .map(|(p, t)| (p - t).powi(2))
            .sum();
        let rmse = (sq_err / predictions.len() as f64).sqrt();
        let r2 = r_squared(y_test, &predictions);
        println!(
            "OOS Test (n={}): RMSE={:.4}, R²={:.3}",
            x_test.len(),
            rmse,
            r2
        );
    }

    let store = ModelStore::new(args.models_dir.clone());
    store.save(&ModelArtifact { scaler, predictor })?;
    println!("Model artifact saved to {:?}", args.models_dir);

    Ok(())
}
