// ============================================================
// Layer 5 — Pipeline
// ============================================================
// The bundled preprocessing + classification artifact:
//
//   PipelineArtifact  — exactly what is on disk (serde types)
//   Pipeline          — an artifact that passed validation and
//                       can be evaluated; implements Classifier
//
// Validation happens once, when the Pipeline is built. After
// that the pipeline is read-only and every evaluation is a pure
// function of the row, so one instance can be shared by all
// request handlers without locking.

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::row::NormalizedRow;
use crate::domain::traits::Classifier;
use crate::ml::classifier::ClassifierModel;
use crate::ml::transform::ColumnTransformer;

/// Artifact layout version this build understands
pub const FORMAT_VERSION: u32 = 1;

/// On-disk pipeline layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineArtifact {
    pub format_version: u32,
    pub preprocessor:   ColumnTransformer,
    pub classifier:     ClassifierModel,
}

impl PipelineArtifact {
    /// All structural checks, in the order a reader would hit them
    pub fn validate(&self, categorical: &[String]) -> Result<()> {
        ensure!(
            self.format_version == FORMAT_VERSION,
            "Unsupported pipeline format_version {} (expected {})",
            self.format_version, FORMAT_VERSION
        );
        self.preprocessor
            .validate(categorical)
            .context("Invalid preprocessor")?;
        self.classifier
            .validate(self.preprocessor.output_width())
            .context("Invalid classifier")?;
        Ok(())
    }
}

/// A validated, evaluable pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    preprocessor: ColumnTransformer,
    classifier:   ClassifierModel,
}

impl Pipeline {
    /// Validate an artifact and take ownership of its stages
    pub fn new(artifact: PipelineArtifact, categorical: &[String]) -> Result<Self> {
        artifact.validate(categorical)?;
        Ok(Self {
            preprocessor: artifact.preprocessor,
            classifier:   artifact.classifier,
        })
    }

    pub fn expected_columns(&self) -> Vec<String> {
        self.preprocessor.expected_columns()
    }

    /// Dense feature vector the classifier sees for `row`
    pub fn features(&self, row: &NormalizedRow) -> Result<Vec<f64>> {
        self.preprocessor.transform(row)
    }
}

impl Classifier for Pipeline {
    fn predict_proba(&self, row: &NormalizedRow) -> Result<f64> {
        let x = self.features(row)?;
        self.classifier.probability(&x)
    }

    fn threshold(&self) -> f64 {
        self.classifier.threshold()
    }
}
