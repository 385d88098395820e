pub mod embeddings;
pub mod predictor;
pub mod scaler;
pub mod synthetic;

use serde::{Deserialize, Serialize};

use predictor::PredictorState;
use scaler::ScalerState;

/// The persisted (scaler, predictor) pair, treated as one atomic unit.
///
/// Both halves are fit from the same training run; loading one without the
/// other is invalid, which `ModelStore::load` enforces by returning `None`
/// unless both are present.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub scaler: ScalerState,
    pub predictor: PredictorState,
}
