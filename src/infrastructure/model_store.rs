//! Persistence for the trained model artifact.
//!
//! The artifact is two JSON files under a fixed models directory: scaler
//! statistics and fitted regressor. Both must be present for the artifact to
//! count as trained; writes go through a temp file plus rename so concurrent
//! readers never observe a half-written artifact.

use crate::application::ml::ModelArtifact;
use crate::application::ml::predictor::PredictorState;
use crate::application::ml::scaler::ScalerState;
use crate::domain::errors::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const SCALER_FILE: &str = "scaler.json";
const PREDICTOR_FILE: &str = "predictor.json";

/// Handles save/load of the (scaler, predictor) pair as one unit.
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persists both halves of the artifact.
    ///
    /// Each file is written to `<name>.tmp` and renamed into place, so a
    /// failure mid-write leaves any previously committed artifact intact.
    pub fn save(&self, artifact: &ModelArtifact) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Write {
            path: self.dir.clone(),
            source,
        })?;

        self.write_atomic(SCALER_FILE, &artifact.scaler)?;
        self.write_atomic(PREDICTOR_FILE, &artifact.predictor)?;

        info!("Saved model artifact to {:?}", self.dir);
        Ok(())
    }

    /// Loads the artifact, or `None` when either half is missing.
    ///
    /// Absence means "untrained" and is a normal outcome for the caller to
    /// handle; a present-but-unparsable file is an error.
    pub fn load(&self) -> Result<Option<ModelArtifact>, StoreError> {
        let scaler_path = self.dir.join(SCALER_FILE);
        let predictor_path = self.dir.join(PREDICTOR_FILE);

        if !scaler_path.exists() || !predictor_path.exists() {
            return Ok(None);
        }

        let scaler: ScalerState = read_json(&scaler_path)?;
        let predictor: PredictorState = read_json(&predictor_path)?;

        info!("Loaded model artifact from {:?}", self.dir);
        Ok(Some(ModelArtifact { scaler, predictor }))
    }

    fn write_atomic<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        let path = self.dir.join(name);
        let temp_path = path.with_extension("tmp");

        let content = serde_json::to_vec(value).map_err(|source| StoreError::Write {
            path: path.clone(),
            source: std::io::Error::other(source),
        })?;

        fs::write(&temp_path, content).map_err(|source| StoreError::Write {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &path).map_err(|source| StoreError::Write { path, source })?;

        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ml::predictor::TrainOptions;
    use crate::application::ml::{predictor::PredictorState, scaler::ScalerState};
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_test_store() -> (ModelStore, PathBuf) {
        let unique_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "symtrack_test_{}_{}_{}_store",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0),
            unique_id
        ));
        (ModelStore::new(temp_dir.clone()), temp_dir)
    }

    fn cleanup_test_dir(temp_dir: PathBuf) {
        fs::remove_dir_all(temp_dir).ok();
    }

    fn fit_test_artifact() -> ModelArtifact {
        let samples = vec![
            vec![1.0, 0.0, 1.0, 2.0],
            vec![5.0, 3.0, 0.0, 4.0],
            vec![9.0, 6.0, 1.0, 7.0],
        ];
        let targets = vec![2.0, 5.0, 8.0];

        let scaler = ScalerState::fit(&samples).unwrap();
        let scaled = scaler.transform_batch(&samples).unwrap();
        let predictor = PredictorState::fit(&scaled, &targets, TrainOptions::default()).unwrap();

        ModelArtifact { scaler, predictor }
    }

    #[test]
    fn test_load_without_artifact_returns_none() {
        let (store, temp_dir) = create_test_store();
        assert!(store.load().unwrap().is_none());
        cleanup_test_dir(temp_dir);
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let (store, temp_dir) = create_test_store();
        let artifact = fit_test_artifact();

        store.save(&artifact).unwrap();
        let loaded = store.load().unwrap().expect("artifact should exist");

        // Scaler parameters come back bit-identical.
        assert_eq!(loaded.scaler, artifact.scaler);

        // The restored predictor agrees with the original on a probe vector.
        let probe = loaded.scaler.transform(&[4.0, 2.0, 1.0, 3.0]).unwrap();
        assert_eq!(
            loaded.predictor.predict(&probe).unwrap(),
            artifact.predictor.predict(&probe).unwrap()
        );
        assert_eq!(loaded.predictor.n_features, artifact.predictor.n_features);
        assert_eq!(loaded.predictor.r2, artifact.predictor.r2);

        cleanup_test_dir(temp_dir);
    }

    #[test]
    fn test_half_artifact_counts_as_missing() {
        let (store, temp_dir) = create_test_store();
        let artifact = fit_test_artifact();
        store.save(&artifact).unwrap();

        // Drop one half: the pair must load together or not at all.
        fs::remove_file(store.dir().join(PREDICTOR_FILE)).unwrap();
        assert!(store.load().unwrap().is_none());

        cleanup_test_dir(temp_dir);
    }

    #[test]
    fn test_corrupt_file_is_an_error_not_none() {
        let (store, temp_dir) = create_test_store();
        let artifact = fit_test_artifact();
        store.save(&artifact).unwrap();

        fs::write(store.dir().join(SCALER_FILE), "not json").unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));

        cleanup_test_dir(temp_dir);
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let (store, temp_dir) = create_test_store();
        store.save(&fit_test_artifact()).unwrap();

        let leftovers: Vec<_> = fs::read_dir(store.dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());

        cleanup_test_dir(temp_dir);
    }
}
