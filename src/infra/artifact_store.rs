// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Reads (and, in tests, writes) the serialized
// pipeline artifact.
//
// What is on disk:
//   models/
//     koi_pipeline.json   ← preprocessor stages + classifier
//
// Loading is a startup-only operation. Every failure here is
// fatal to the process: a missing file, unreadable bytes,
// malformed JSON or a layout version this build doesn't know.
// The error carries the path so the operator knows which file
// to fix. Structural validation (widths, column kinds) happens
// one layer up, in ml::pipeline, where the categorical list is
// known.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::ml::pipeline::PipelineArtifact;

/// Default artifact location, relative to the working directory
pub const DEFAULT_ARTIFACT_PATH: &str = "models/koi_pipeline.json";

/// Knows where one pipeline artifact lives
pub struct ArtifactStore {
    path: PathBuf,
}

impl ArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and deserialise the artifact.
    pub fn load(&self) -> Result<PipelineArtifact> {
        let json = fs::read_to_string(&self.path).with_context(|| {
            format!("Cannot read pipeline artifact '{}'", self.path.display())
        })?;

        let artifact: PipelineArtifact = serde_json::from_str(&json).with_context(|| {
            format!("Pipeline artifact '{}' is not valid JSON for this layout", self.path.display())
        })?;

        tracing::debug!(
            "Read pipeline artifact '{}' (format_version {}, {} stages)",
            self.path.display(),
            artifact.format_version,
            artifact.preprocessor.transformers.len(),
        );
        Ok(artifact)
    }

    /// Write an artifact as pretty-printed JSON, creating parent
    /// directories as needed.
    #[cfg(test)]
    pub fn save(&self, artifact: &PipelineArtifact) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create '{}'", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(artifact)?;
        fs::write(&self.path, json).with_context(|| {
            format!("Cannot write pipeline artifact '{}'", self.path.display())
        })?;
        tracing::debug!("Saved pipeline artifact to '{}'", self.path.display());
        Ok(())
    }
}
