//! Standard scaling of feature vectors.
//!
//! Statistics are fit once from the training set and are read-only
//! afterwards; inference must go through the same `(x - mean) / std`
//! arithmetic the training batch did.

use crate::domain::errors::MlError;
use serde::{Deserialize, Serialize};

/// Per-field scaling statistics: zero-mean/unit-variance normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerState {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl ScalerState {
    /// Fits per-field mean and population standard deviation across all samples.
    ///
    /// A field with zero variance gets a stored std of 1.0 so `transform`
    /// passes it through unchanged instead of dividing by zero.
    pub fn fit(samples: &[Vec<f64>]) -> Result<Self, MlError> {
        let Some(first) = samples.first() else {
            return Err(MlError::EmptyInput);
        };

        let width = first.len();
        if width == 0 {
            return Err(MlError::EmptyInput);
        }
        for row in samples {
            if row.len() != width {
                return Err(MlError::ShapeMismatch {
                    expected: width,
                    got: row.len(),
                });
            }
        }

        let n = samples.len() as f64;
        let mut means = vec![0.0; width];
        for row in samples {
            for (acc, value) in means.iter_mut().zip(row) {
                *acc += value;
            }
        }
        for mean in &mut means {
            *mean /= n;
        }

        let mut stds = vec![0.0; width];
        for row in samples {
            for (acc, (value, mean)) in stds.iter_mut().zip(row.iter().zip(&means)) {
                *acc += (value - mean).powi(2);
            }
        }
        for std in &mut stds {
            *std = (*std / n).sqrt();
            if *std == 0.0 {
                *std = 1.0;
            }
        }

        Ok(Self { means, stds })
    }

    /// Number of fields this scaler was fit on.
    pub fn width(&self) -> usize {
        self.means.len()
    }

    /// Scales a single feature vector into zero-mean/unit-variance space.
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, MlError> {
        if features.len() != self.width() {
            return Err(MlError::ShapeMismatch {
                expected: self.width(),
                got: features.len(),
            });
        }

        Ok(features
            .iter()
            .zip(self.means.iter().zip(&self.stds))
            .map(|(value, (mean, std))| (value - mean) / std)
            .collect())
    }

    /// Scales a batch of rows with the exact same arithmetic as `transform`.
    pub fn transform_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, MlError> {
        rows.iter().map(|row| self.transform(row)).collect()
    }
}
