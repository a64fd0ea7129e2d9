// ============================================================
// Layer 5 — Inference Adapter
// ============================================================
// Owns the loaded pipeline for the lifetime of the process and
// exposes predict(raw_fields) → display string.
//
//   raw fields ──► Normalizer ──► NormalizedRow ──► Pipeline ──► Label ──► verdict
//
// Construction loads the artifact once and captures the column
// order from the preprocessor's stage metadata. Any failure at
// that point is fatal; there is no runtime reload.
//
// After construction nothing in here is mutated, so a single
// adapter behind an Arc serves every request concurrently.

use anyhow::{Context, Result};
use std::path::Path;

use crate::data::normalizer::Normalizer;
use crate::domain::input::RawFields;
use crate::domain::prediction::{Label, PredictionReport};
use crate::domain::row::NormalizedRow;
use crate::domain::schema::FeatureSchema;
use crate::domain::traits::{Classifier, FieldPredictor};
use crate::infra::artifact_store::ArtifactStore;
use crate::ml::pipeline::{Pipeline, PipelineArtifact};

#[derive(Debug)]
pub struct InferenceAdapter {
    normalizer: Normalizer,
    pipeline:   Pipeline,
}

impl InferenceAdapter {
    /// Load the artifact at `path` and build the adapter.
    pub fn from_artifact(path: impl AsRef<Path>, categorical: &[String]) -> Result<Self> {
        let path     = path.as_ref();
        let artifact = ArtifactStore::new(path).load()?;
        let adapter  = Self::new(artifact, categorical)
            .with_context(|| format!("Pipeline artifact '{}' is unusable", path.display()))?;

        tracing::info!(
            "Pipeline loaded from '{}' ({} columns, {} categorical)",
            path.display(),
            adapter.schema().columns().len(),
            categorical.len(),
        );
        Ok(adapter)
    }

    /// Build the adapter from an in-memory artifact
    pub fn new(artifact: PipelineArtifact, categorical: &[String]) -> Result<Self> {
        let pipeline = Pipeline::new(artifact, categorical)?;
        let schema   = FeatureSchema::new(pipeline.expected_columns(), categorical);
        Ok(Self {
            normalizer: Normalizer::new(schema),
            pipeline,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.normalizer.schema()
    }

    /// Reindex, coerce and fill the raw fields onto the schema
    pub fn normalize(&self, raw: &RawFields) -> NormalizedRow {
        self.normalizer.normalize(raw)
    }

    /// The pipeline's binary label for the raw fields
    pub fn predict_label(&self, raw: &RawFields) -> Result<Label> {
        self.pipeline.predict(&self.normalize(raw))
    }

    /// Label, probability and display string
    pub fn predict_detailed(&self, raw: &RawFields) -> Result<PredictionReport> {
        let row   = self.normalize(raw);
        let proba = self.pipeline.predict_proba(&row)?;
        let label = self.pipeline.label_for(proba);
        tracing::debug!("Prediction label={} p={:.4}", label.0, proba);
        Ok(PredictionReport::new(label, proba))
    }

    /// One of the two fixed display strings
    pub fn predict(&self, raw: &RawFields) -> Result<String> {
        Ok(self.predict_label(raw)?.verdict().to_string())
    }
}

impl FieldPredictor for InferenceAdapter {
    fn schema(&self) -> &FeatureSchema {
        InferenceAdapter::schema(self)
    }

    fn predict_detailed(&self, raw: &RawFields) -> Result<PredictionReport> {
        InferenceAdapter::predict_detailed(self, raw)
    }

    fn predict(&self, raw: &RawFields) -> Result<String> {
        InferenceAdapter::predict(self, raw)
    }
}
