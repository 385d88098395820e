//! Symtrack prediction server.
//!
//! Serves the train/predict/analyze/embeddings boundary as newline-delimited
//! JSON over stdin/stdout: one request per line, one response per line. The
//! HTTP layer in front of this process is an external collaborator. Logs go
//! to stderr so stdout stays protocol-clean.
//!
//! # Usage
//! ```sh
//! echo '{"op":"health"}' | cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `MODELS_DIR` - Directory for the persisted model artifact (default: models)
//! - `SYNTHETIC_SAMPLES` - Training set size for synthetic runs (default: 1000)
//! - `TRAIN_SEED` - RNG seed for synthetic training data (default: 42)

use anyhow::Result;
use std::sync::Arc;
use symtrack::application::service::PredictionService;
use symtrack::config::Config;
use symtrack::infrastructure::model_store::ModelStore;
use symtrack::interfaces::api::ApiHandler;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    info!("Symtrack Server {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: models_dir={:?}, synthetic_samples={}",
        config.models_dir, config.synthetic_samples
    );

    let store = ModelStore::new(config.models_dir.clone());
    let service = Arc::new(PredictionService::new(store, config));
    let handler = ApiHandler::new(service.clone());

    info!(
        "Service ready (trained: {}). Reading NDJSON requests from stdin.",
        service.is_trained()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handler.handle_json(line);
        let mut payload = serde_json::to_vec(&response)?;
        payload.push(b'\n');
        stdout.write_all(&payload).await?;
        stdout.flush().await?;
    }

    info!("Stdin closed. Exiting...");
    Ok(())
}
