//! Transport-agnostic request/response boundary.
//!
//! The HTTP framework is an external collaborator; this module defines the
//! wire shapes and the handler that maps them onto the service facade. Every
//! operation returns a structured success/failure payload, and failures keep
//! enough of the underlying error to tell "not trained" from "bad input".

use crate::application::service::PredictionService;
use crate::domain::types::{SymptomRecord, TrendSummary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Train {
        /// Accepted for wire compatibility; the forest trainer ignores it.
        epochs: Option<u32>,
    },
    Predict {
        features: Vec<f64>,
    },
    Analyze {
        records: Vec<SymptomRecord>,
    },
    Embeddings {
        text: String,
    },
    Health,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Response {
    Train(TrainResponse),
    Predict(PredictResponse),
    Analyze(AnalyzeResponse),
    Embeddings(EmbeddingsResponse),
    Health(HealthResponse),
    Error(ErrorResponse),
}

#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    pub prediction: f64,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: TrendSummary,
}

#[derive(Debug, Serialize)]
pub struct EmbeddingsResponse {
    pub success: bool,
    pub vector: Vec<f32>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub trained: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Maps boundary requests onto the service facade.
pub struct ApiHandler {
    service: Arc<PredictionService>,
}

impl ApiHandler {
    pub fn new(service: Arc<PredictionService>) -> Self {
        Self { service }
    }

    /// Parses one JSON request and handles it. Malformed input becomes a
    /// structured error response rather than a transport failure.
    pub fn handle_json(&self, raw: &str) -> Response {
        match serde_json::from_str::<Request>(raw) {
            Ok(request) => self.handle(request),
            Err(e) => Response::Error(ErrorResponse::new(format!("Invalid request: {e}"))),
        }
    }

    pub fn handle(&self, request: Request) -> Response {
        match request {
            Request::Train { epochs } => {
                if let Some(epochs) = epochs {
                    debug!("Ignoring epochs={epochs}: forest training is not epoch-based");
                }
                match self.service.train() {
                    Ok(report) => Response::Train(TrainResponse {
                        success: true,
                        message: format!(
                            "Model trained on {} samples (R²={:.3})",
                            report.samples, report.r2
                        ),
                    }),
                    Err(e) => Response::Error(ErrorResponse::new(e.to_string())),
                }
            }
            Request::Predict { features } => match self.service.predict(&features) {
                Ok(prediction) => Response::Predict(PredictResponse {
                    success: true,
                    prediction,
                }),
                Err(e) => Response::Error(ErrorResponse::new(e.to_string())),
            },
            Request::Analyze { records } => Response::Analyze(AnalyzeResponse {
                success: true,
                analysis: self.service.analyze(&records),
            }),
            Request::Embeddings { text } => Response::Embeddings(EmbeddingsResponse {
                success: true,
                vector: self.service.embed(&text),
            }),
            Request::Health => Response::Health(HealthResponse {
                status: "ok",
                trained: self.service.is_trained(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::infrastructure::model_store::ModelStore;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn test_handler() -> (ApiHandler, std::path::PathBuf) {
        let unique_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "symtrack_test_{}_{}_{}_api",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0),
            unique_id
        ));
        let config = Config {
            models_dir: temp_dir.clone(),
            synthetic_samples: 150,
            n_trees: 12,
            ..Config::default()
        };
        let service = PredictionService::new(ModelStore::new(temp_dir.clone()), config);
        (ApiHandler::new(Arc::new(service)), temp_dir)
    }

    fn cleanup(temp_dir: std::path::PathBuf) {
        std::fs::remove_dir_all(temp_dir).ok();
    }

    #[test]
    fn test_health_reports_untrained() {
        let (handler, dir) = test_handler();
        let json = serde_json::to_value(handler.handle_json(r#"{"op":"health"}"#)).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["trained"], false);
        cleanup(dir);
    }

    #[test]
    fn test_predict_before_train_is_a_structured_failure() {
        let (handler, dir) = test_handler();
        let response = handler.handle_json(r#"{"op":"predict","features":[5.0,2.0,1.0,3.0]}"#);
        let json = serde_json::to_value(response).unwrap();

        assert_eq!(json["success"], false);
        let error = json["error"].as_str().unwrap();
        assert!(error.to_lowercase().contains("not trained"), "got: {error}");
        cleanup(dir);
    }

    #[test]
    fn test_train_then_predict_clamped() {
        let (handler, dir) = test_handler();

        let json = serde_json::to_value(handler.handle_json(r#"{"op":"train"}"#)).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["message"].as_str().unwrap().contains("150 samples"));

        let response = handler.handle_json(r#"{"op":"predict","features":[8.0,3.0,1.0,2.0]}"#);
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["success"], true);
        let prediction = json["prediction"].as_f64().unwrap();
        assert!((1.0..=10.0).contains(&prediction));
        // One decimal place contract.
        assert_eq!((prediction * 10.0).round() / 10.0, prediction);

        cleanup(dir);
    }

    #[test]
    fn test_predict_with_wrong_width_names_shape() {
        let (handler, dir) = test_handler();
        handler.handle(Request::Train { epochs: None });

        let response = handler.handle_json(r#"{"op":"predict","features":[1.0]}"#);
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("expects 4"));
        cleanup(dir);
    }

    #[test]
    fn test_embeddings_returns_128_bits() {
        let (handler, dir) = test_handler();
        let response = handler.handle_json(r#"{"op":"embeddings","text":"night sweats"}"#);
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["vector"].as_array().unwrap().len(), 128);
        cleanup(dir);
    }

    #[test]
    fn test_analyze_empty_history() {
        let (handler, dir) = test_handler();
        let response = handler.handle_json(r#"{"op":"analyze","records":[]}"#);
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["analysis"]["trend"], "insufficient_data");
        assert_eq!(json["analysis"]["total_count"], 0);
        cleanup(dir);
    }

    #[test]
    fn test_malformed_json_is_a_structured_error() {
        let (handler, dir) = test_handler();
        let json = serde_json::to_value(handler.handle_json("{nope")).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("Invalid request"));
        cleanup(dir);
    }
}
