// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// The per-request boundary. Whatever goes wrong while decoding
// the body or evaluating the pipeline is caught here and turned
// into an "Error: ..." string that the page shows in place of
// the result. The request itself always completes normally.
//
//   Step 1: Decode body into RawFields   (Layer 4 - data)
//   Step 2: Predict                      (Layer 5 - ml, via FieldPredictor)
//   Step 3: Guard                        → verdict string or PredictionOutcome
//
// The page only needs the display string, so it goes through
// FieldPredictor::predict. The JSON API and the CLI want label
// and probability too and go through predict_detailed.

use serde::Serialize;
use std::sync::Arc;

use crate::data::decoder::decode_body;
use crate::domain::input::RawFields;
use crate::domain::prediction::PredictionReport;
use crate::domain::schema::FeatureSchema;
use crate::domain::traits::FieldPredictor;

/// What one guarded prediction produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionOutcome {
    Success(PredictionReport),
    Failure { error: String },
}

/// Display string for a guarded page request: the verdict, or the
/// "Error: ..." text shown in its place
pub type Verdict = Result<String, String>;

fn error_text(err: &anyhow::Error) -> String {
    format!("Error: {err:#}")
}

impl PredictionOutcome {
    pub(crate) fn failure(err: &anyhow::Error) -> Self {
        PredictionOutcome::Failure { error: error_text(err) }
    }

    /// The string shown to the user: a verdict or an error
    pub fn display(&self) -> &str {
        match self {
            PredictionOutcome::Success(report) => &report.prediction,
            PredictionOutcome::Failure { error } => error,
        }
    }
}

/// Shares one read-only predictor across every request
#[derive(Clone)]
pub struct PredictUseCase {
    predictor: Arc<dyn FieldPredictor>,
}

impl PredictUseCase {
    pub fn new(predictor: Arc<dyn FieldPredictor>) -> Self {
        Self { predictor }
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.predictor.schema()
    }

    /// Predict from already-decoded fields, guarded
    pub fn predict_fields(&self, raw: &RawFields) -> PredictionOutcome {
        match self.predictor.predict_detailed(raw) {
            Ok(report) => PredictionOutcome::Success(report),
            Err(e) => {
                tracing::warn!("Prediction failed: {e:#}");
                PredictionOutcome::failure(&e)
            }
        }
    }

    /// Display string only, guarded
    pub fn verdict_for_fields(&self, raw: &RawFields) -> Verdict {
        self.predictor.predict(raw).map_err(|e| {
            tracing::warn!("Prediction failed: {e:#}");
            error_text(&e)
        })
    }

    /// Decode a request body and predict, guarded.
    ///
    /// Returns the decoded fields alongside the outcome; they are
    /// empty when decoding failed.
    pub fn predict_body(
        &self,
        content_type: Option<&str>,
        body:         &[u8],
    ) -> (RawFields, PredictionOutcome) {
        match decode(content_type, body) {
            Ok(raw) => {
                let outcome = self.predict_fields(&raw);
                (raw, outcome)
            }
            Err(e) => (RawFields::new(), PredictionOutcome::failure(&e)),
        }
    }

    /// Decode a request body and produce the page's display string,
    /// guarded. The decoded fields come back so the page can echo
    /// them into the form.
    pub fn verdict_for_body(
        &self,
        content_type: Option<&str>,
        body:         &[u8],
    ) -> (RawFields, Verdict) {
        match decode(content_type, body) {
            Ok(raw) => {
                let verdict = self.verdict_for_fields(&raw);
                (raw, verdict)
            }
            Err(e) => (RawFields::new(), Err(error_text(&e))),
        }
    }
}

fn decode(content_type: Option<&str>, body: &[u8]) -> anyhow::Result<RawFields> {
    let raw = decode_body(content_type, body)
        .inspect_err(|e| tracing::warn!("Cannot decode request body: {e:#}"))?;
    tracing::debug!("Form data: {:?}", raw);
    Ok(raw)
}
