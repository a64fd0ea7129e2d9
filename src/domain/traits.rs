// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Two seams:
//
//   Classifier     — anything that turns a normalized row into a
//                    label (the loaded pipeline implements it)
//   FieldPredictor — anything that turns raw request fields into
//                    a display string (the inference adapter
//                    implements it; the use case and the web
//                    layer only ever see this trait)
//
// Programming the application layer against FieldPredictor lets
// the request guard be tested with a predictor that always fails,
// without building a broken artifact on disk.

use anyhow::Result;

use crate::domain::input::RawFields;
use crate::domain::prediction::{Label, PredictionReport};
use crate::domain::row::NormalizedRow;
use crate::domain::schema::FeatureSchema;

// ─── Classifier ───────────────────────────────────────────────────────────────
/// The pipeline's decision function over one normalized row.
pub trait Classifier {
    /// Positive-class probability for the row
    fn predict_proba(&self, row: &NormalizedRow) -> Result<f64>;

    /// Probability above which the label is positive
    fn threshold(&self) -> f64;

    /// Label for an already computed probability
    fn label_for(&self, probability: f64) -> Label {
        if probability > self.threshold() {
            Label::POSITIVE
        } else {
            Label::NEGATIVE
        }
    }

    /// Binary label for the row
    fn predict(&self, row: &NormalizedRow) -> Result<Label> {
        Ok(self.label_for(self.predict_proba(row)?))
    }
}

// ─── FieldPredictor ───────────────────────────────────────────────────────────
/// End-to-end prediction from raw request fields.
///
/// Implementations must be safe to share across request handlers,
/// hence the Send + Sync bound.
pub trait FieldPredictor: Send + Sync {
    /// The ordered schema this predictor normalizes onto
    fn schema(&self) -> &FeatureSchema;

    /// Label, probability and display string for the fields
    fn predict_detailed(&self, raw: &RawFields) -> Result<PredictionReport>;

    /// Display string only
    fn predict(&self, raw: &RawFields) -> Result<String> {
        Ok(self.predict_detailed(raw)?.prediction)
    }
}
