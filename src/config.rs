use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::application::ml::predictor::TrainOptions;

/// Runtime configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the persisted model artifact.
    pub models_dir: PathBuf,
    /// Size of the generated training set when no CSV is supplied.
    pub synthetic_samples: usize,
    pub train_seed: u64,
    pub n_trees: usize,
    pub max_depth: u16,
    pub min_samples_split: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let models_dir =
            PathBuf::from(env::var("MODELS_DIR").unwrap_or_else(|_| "models".to_string()));

        let synthetic_samples = env::var("SYNTHETIC_SAMPLES")
            .unwrap_or_else(|_| "1000".to_string())
            .parse::<usize>()
            .context("Failed to parse SYNTHETIC_SAMPLES")?;

        let train_seed = env::var("TRAIN_SEED")
            .unwrap_or_else(|_| "42".to_string())
            .parse::<u64>()
            .context("Failed to parse TRAIN_SEED")?;

        let n_trees = env::var("N_TREES")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<usize>()
            .context("Failed to parse N_TREES")?;

        let max_depth = env::var("MAX_DEPTH")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u16>()
            .context("Failed to parse MAX_DEPTH")?;

        let min_samples_split = env::var("MIN_SAMPLES_SPLIT")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<usize>()
            .context("Failed to parse MIN_SAMPLES_SPLIT")?;

        Ok(Self {
            models_dir,
            synthetic_samples,
            train_seed,
            n_trees,
            max_depth,
            min_samples_split,
        })
    }

    pub fn train_options(&self) -> TrainOptions {
        TrainOptions {
            n_trees: self.n_trees,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            seed: self.train_seed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("models"),
            synthetic_samples: 1000,
            train_seed: 42,
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 5,
        }
    }
}
