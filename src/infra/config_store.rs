// ============================================================
// Layer 6 — Config Store
// ============================================================
// Reads an optional JSON configuration file. Every key is
// optional; keys that are present override the built-in
// defaults, and explicit command line flags override the file.
//
// Example config.json:
//   {
//     "model_path": "models/koi_pipeline.json",
//     "bind_addr": "0.0.0.0:8080",
//     "categorical_features": ["koi_tce_delivname"]
//   }

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

/// The subset of settings a config file may provide
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub model_path:           Option<String>,
    pub bind_addr:            Option<String>,
    pub categorical_features: Option<Vec<String>>,
}

impl ConfigFile {
    /// Load and parse a config file. A missing or malformed file is an error:
    /// the operator asked for it explicitly.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file '{}'", path.display()))?;
        let cfg: ConfigFile = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file '{}'", path.display()))?;
        tracing::debug!("Loaded config file '{}'", path.display());
        Ok(cfg)
    }
}
