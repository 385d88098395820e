//! Service facade over the prediction pipeline.
//!
//! Owns the process-scoped model state: one `ModelArtifact` behind a lock,
//! loaded from the store at startup and replaced wholesale on retrain.
//! Concurrent predicts read the previously committed artifact until the new
//! one is swapped in; train calls are serialized against each other.

use crate::application::analysis;
use crate::application::ml::embeddings;
use crate::application::ml::predictor::PredictorState;
use crate::application::ml::scaler::ScalerState;
use crate::application::ml::synthetic;
use crate::application::ml::ModelArtifact;
use crate::config::Config;
use crate::domain::errors::MlError;
use crate::domain::types::{SymptomRecord, TrainReport, TrendSummary};
use crate::infrastructure::model_store::ModelStore;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{info, warn};

pub struct PredictionService {
    store: ModelStore,
    config: Config,
    artifact: RwLock<Option<Arc<ModelArtifact>>>,
    /// Serializes retraining; predicts keep reading the old artifact meanwhile.
    train_lock: Mutex<()>,
}

impl PredictionService {
    /// Creates the service and attempts to restore a persisted artifact.
    ///
    /// A missing artifact just means the service starts untrained; a corrupt
    /// one is logged and likewise treated as untrained so the process can
    /// still serve analysis and retrain.
    pub fn new(store: ModelStore, config: Config) -> Self {
        let artifact = match store.load() {
            Ok(Some(artifact)) => {
                info!(
                    "Restored model artifact (train R²={:.3}, {} features)",
                    artifact.predictor.r2, artifact.predictor.n_features
                );
                Some(Arc::new(artifact))
            }
            Ok(None) => {
                info!("No model artifact found. Service starts untrained");
                None
            }
            Err(e) => {
                warn!("Failed to restore model artifact: {e}. Service starts untrained");
                None
            }
        };

        Self {
            store,
            config,
            artifact: RwLock::new(artifact),
            train_lock: Mutex::new(()),
        }
    }

    /// Trains on a freshly generated synthetic set (configured size/seed).
    pub fn train(&self) -> Result<TrainReport, MlError> {
        let (x, y) = synthetic::generate(self.config.synthetic_samples, self.config.train_seed);
        self.train_on(&x, &y)
    }

    /// Full training run on an explicit set: fit scaler, fit predictor,
    /// persist, then swap the in-memory artifact.
    pub fn train_on(&self, samples: &[Vec<f64>], targets: &[f64]) -> Result<TrainReport, MlError> {
        let _guard = self
            .train_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let scaler = ScalerState::fit(samples)?;
        let scaled = scaler.transform_batch(samples)?;
        let predictor = PredictorState::fit(&scaled, targets, self.config.train_options())?;

        let report = TrainReport {
            samples: samples.len(),
            r2: predictor.r2,
        };

        let artifact = ModelArtifact { scaler, predictor };
        self.store.save(&artifact)?;

        *self.artifact.write().expect("artifact lock poisoned") = Some(Arc::new(artifact));
        info!(
            "Model retrained on {} samples, train R²={:.3}",
            report.samples, report.r2
        );

        Ok(report)
    }

    /// Predicts severity for a raw feature vector.
    ///
    /// Lazy-loads the artifact from the store if memory is empty; an
    /// untrained service fails with `ModelNotTrained` rather than returning
    /// any default. The raw regression output is rounded to one decimal and
    /// clamped into [1, 10] here, as a presentation contract independent of
    /// the model.
    pub fn predict(&self, features: &[f64]) -> Result<f64, MlError> {
        let artifact = match self.current_artifact() {
            Some(artifact) => artifact,
            None => self.load_artifact()?.ok_or(MlError::ModelNotTrained)?,
        };

        let scaled = artifact.scaler.transform(features)?;
        let raw = artifact.predictor.predict(&scaled)?;

        Ok(clamp_severity(raw))
    }

    /// Descriptive analysis of a symptom history. Stateless: no model needed.
    pub fn analyze(&self, records: &[SymptomRecord]) -> TrendSummary {
        analysis::analyze(records)
    }

    /// Placeholder deterministic text embedding.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        embeddings::embed(text)
    }

    pub fn is_trained(&self) -> bool {
        self.current_artifact().is_some()
    }

    fn current_artifact(&self) -> Option<Arc<ModelArtifact>> {
        self.artifact
            .read()
            .expect("artifact lock poisoned")
            .clone()
    }

    fn load_artifact(&self) -> Result<Option<Arc<ModelArtifact>>, MlError> {
        let mut slot = self.artifact.write().expect("artifact lock poisoned");
        if slot.is_none() {
            if let Some(artifact) = self.store.load()? {
                *slot = Some(Arc::new(artifact));
            }
        }
        Ok(slot.clone())
    }
}

/// Presentation contract for user-visible severities: one decimal place,
/// clamped into the valid 1-10 domain.
fn clamp_severity(raw: f64) -> f64 {
    ((raw * 10.0).round() / 10.0).clamp(1.0, 10.0)
}
