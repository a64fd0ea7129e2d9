// ============================================================
// Layer 3 — Prediction Result
// ============================================================
// The pipeline answers with a binary label. The screener never
// shows the label itself — it maps it to one of two fixed
// display strings:
//
//   label 1        → "Exoplanet candidate detected! 🚀"
//   anything else  → "No exoplanet detected this time. Keep hunting!"

use serde::Serialize;

pub const POSITIVE_MESSAGE: &str = "Exoplanet candidate detected! 🚀";
pub const NEGATIVE_MESSAGE: &str = "No exoplanet detected this time. Keep hunting!";

/// Binary label returned by the pipeline's decision function.
/// Kept as the raw integer so "any value other than 1" stays
/// representable, exactly like the pipeline reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Label(pub u8);

impl Label {
    pub const POSITIVE: Label = Label(1);
    pub const NEGATIVE: Label = Label(0);

    pub fn is_positive(&self) -> bool {
        self.0 == 1
    }

    /// The fixed display string this label maps to
    pub fn verdict(&self) -> &'static str {
        if self.is_positive() {
            POSITIVE_MESSAGE
        } else {
            NEGATIVE_MESSAGE
        }
    }
}

/// Everything one prediction produced, for the JSON API and the CLI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    /// Display string (one of the two fixed messages)
    pub prediction:  String,
    pub label:       Label,
    /// Positive-class probability from the classifier
    pub probability: f64,
}

impl PredictionReport {
    pub fn new(label: Label, probability: f64) -> Self {
        Self {
            prediction: label.verdict().to_string(),
            label,
            probability,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_one_is_positive() {
        assert_eq!(Label(1).verdict(), POSITIVE_MESSAGE);
    }

    #[test]
    fn test_any_other_label_is_negative() {
        for raw in [0u8, 2, 255] {
            assert_eq!(Label(raw).verdict(), NEGATIVE_MESSAGE);
        }
    }
}
