use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the scaling/regression pipeline and the service facade.
#[derive(Debug, Error)]
pub enum MlError {
    #[error("Training set is empty")]
    EmptyInput,

    #[error("Feature vector has {got} fields, model expects {expected}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("Model is not trained. Train the model before requesting predictions")]
    ModelNotTrained,

    #[error("Training failed: {reason}")]
    Training { reason: String },

    #[error("Prediction failed: {reason}")]
    Prediction { reason: String },

    #[error("Model storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Errors related to persisting/restoring the model artifact.
///
/// A missing artifact is NOT an error: `ModelStore::load` returns `Ok(None)`
/// so callers must handle the untrained case explicitly.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write model artifact at {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Stored model artifact at {path:?} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to read model artifact at {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}
