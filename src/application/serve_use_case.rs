// ============================================================
// Layer 2 — Serve Use Case
// ============================================================
// Starts the web application:
//
//   Step 1: Load the pipeline artifact    (Layer 5/6 — fatal on failure)
//   Step 2: Build the tokio runtime
//   Step 3: Bind the listener             (fatal on failure)
//   Step 4: Serve until Ctrl-C
//
// The pipeline is loaded before the listener binds, so a broken
// artifact means the process never accepts a connection.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::application::predict_use_case::PredictUseCase;
use crate::data::catalog;
use crate::infra::artifact_store::DEFAULT_ARTIFACT_PATH;
use crate::infra::config_store::ConfigFile;
use crate::ml::inferencer::InferenceAdapter;
use crate::web;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

// ─── Serve Configuration ─────────────────────────────────────────────────────
// Resolved in three layers: built-in defaults, then the optional
// config file, then explicit command line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    pub model_path:           String,
    pub bind_addr:            String,
    pub categorical_features: Vec<String>,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            model_path:           DEFAULT_ARTIFACT_PATH.to_string(),
            bind_addr:            DEFAULT_BIND_ADDR.to_string(),
            categorical_features: catalog::default_categorical(),
        }
    }
}

impl ServeConfig {
    /// Overlay the keys a config file provides
    pub fn with_file(mut self, file: ConfigFile) -> Self {
        if let Some(p) = file.model_path {
            self.model_path = p;
        }
        if let Some(a) = file.bind_addr {
            self.bind_addr = a;
        }
        if let Some(c) = file.categorical_features {
            self.categorical_features = c;
        }
        self
    }
}

// ─── ServeUseCase ─────────────────────────────────────────────────────────────
pub struct ServeUseCase {
    config: ServeConfig,
}

impl ServeUseCase {
    pub fn new(config: ServeConfig) -> Self {
        Self { config }
    }

    /// Load the pipeline and serve until shutdown. Blocks the calling thread.
    pub fn execute(&self) -> Result<()> {
        let adapter = InferenceAdapter::from_artifact(
            &self.config.model_path,
            &self.config.categorical_features,
        )?;
        let use_case = PredictUseCase::new(Arc::new(adapter));

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("Cannot start the async runtime")?;

        runtime.block_on(self.serve(use_case))
    }

    async fn serve(&self, use_case: PredictUseCase) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("Cannot bind to '{}'", self.config.bind_addr))?;

        tracing::info!("Listening on http://{}", listener.local_addr()?);

        axum::serve(listener, web::router(use_case))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ServeConfig::default();
        assert_eq!(cfg.model_path, "models/koi_pipeline.json");
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(cfg.categorical_features, vec!["koi_tce_delivname".to_string()]);
    }

    #[test]
    fn test_file_overrides_only_present_keys() {
        let cfg = ServeConfig::default().with_file(ConfigFile {
            bind_addr: Some("0.0.0.0:8080".into()),
            ..ConfigFile::default()
        });
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");
        assert_eq!(cfg.model_path, DEFAULT_ARTIFACT_PATH);
    }

    #[test]
    fn test_missing_artifact_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ServeConfig {
            model_path: dir.path().join("missing.json").display().to_string(),
            ..ServeConfig::default()
        };
        // Fails before any runtime or listener exists
        assert!(ServeUseCase::new(cfg).execute().is_err());
    }
}
