//! Severity regression on scaled feature vectors.
//!
//! Wraps a smartcore random-forest regressor. The predictor returns the raw
//! regression output; clamping to the 1-10 severity domain is a
//! presentation-layer contract owned by the service facade, so swapping the
//! model never silently changes the clamping rule.

use crate::domain::errors::MlError;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::info;

/// Hyperparameters for a training run.
#[derive(Debug, Clone, Copy)]
pub struct TrainOptions {
    pub n_trees: usize,
    pub max_depth: u16,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 5,
            seed: 42,
        }
    }
}

/// Fitted regression parameters. Read-only after fit.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictorState {
    model: RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>,
    /// Training-set R². Diagnostic only, never used to reject a fit.
    pub r2: f64,
    pub n_features: usize,
}

impl PredictorState {
    /// Fits the forest on already-scaled samples.
    pub fn fit(scaled: &[Vec<f64>], targets: &[f64], opts: TrainOptions) -> Result<Self, MlError> {
        let Some(first) = scaled.first() else {
            return Err(MlError::EmptyInput);
        };
        let n_features = first.len();
        if scaled.len() != targets.len() {
            return Err(MlError::Training {
                reason: format!(
                    "{} samples but {} targets",
                    scaled.len(),
                    targets.len()
                ),
            });
        }

        let x = DenseMatrix::from_2d_vec(&scaled.to_vec()).map_err(|e| MlError::Training {
            reason: format!("Matrix creation failed: {e}"),
        })?;

        let params = RandomForestRegressorParameters::default()
            .with_n_trees(opts.n_trees)
            .with_max_depth(opts.max_depth)
            .with_min_samples_split(opts.min_samples_split)
            .with_seed(opts.seed);

        let model =
            RandomForestRegressor::fit(&x, &targets.to_vec(), params).map_err(|e| {
                MlError::Training {
                    reason: e.to_string(),
                }
            })?;

        let fitted: Vec<f64> = model.predict(&x).map_err(|e| MlError::Training {
            reason: e.to_string(),
        })?;
        let r2 = r_squared(targets, &fitted);
        info!(
            "Fitted severity regressor on {} samples ({} features), train R²={:.3}",
            scaled.len(),
            n_features,
            r2
        );

        Ok(Self {
            model,
            r2,
            n_features,
        })
    }

    /// Raw regression output for a single scaled vector. No clamping here.
    pub fn predict(&self, scaled: &[f64]) -> Result<f64, MlError> {
        if scaled.len() != self.n_features {
            return Err(MlError::ShapeMismatch {
                expected: self.n_features,
                got: scaled.len(),
            });
        }

        let x = DenseMatrix::from_2d_vec(&vec![scaled.to_vec()]).map_err(|e| {
            MlError::Prediction {
                reason: format!("Matrix creation failed: {e}"),
            }
        })?;

        let predictions: Vec<f64> = self.model.predict(&x).map_err(|e| MlError::Prediction {
            reason: e.to_string(),
        })?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| MlError::Prediction {
                reason: "No prediction returned".to_string(),
            })
    }
}

/// Coefficient of determination: 1 - SSE/SST. Zero-variance targets score 0.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.is_empty() || actual.len() != predicted.len() {
        return 0.0;
    }

    let n = actual.len() as f64;
    let mean = actual.iter().sum::<f64>() / n;
    let sst: f64 = actual.iter().map(|y| (y - mean).powi(2)).sum();
    if sst == 0.0 {
        return 0.0;
    }

    let sse: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(y, p)| (y - p).powi(2))
        .sum();

    1.0 - sse / sst
}
