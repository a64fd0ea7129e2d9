// ============================================================
// Layer 5 — ML / Pipeline Layer
// ============================================================
// Everything that knows what the pipeline looks like inside.
// No other layer reads transformer stages or tree nodes — they
// only see the Classifier and FieldPredictor traits.
//
//   transform.rs  — column transformer stages (numeric scaling,
//                   one-hot encoding, passthrough)
//   classifier.rs — gradient-boosted trees and logistic model,
//                   probability + thresholded label
//   pipeline.rs   — on-disk artifact layout and its validation;
//                   the validated Pipeline implements Classifier
//   inferencer.rs — the inference adapter: owns the pipeline and
//                   the schema, maps raw fields to a verdict

/// Column transformer stages
pub mod transform;

/// Tree ensemble and logistic classifiers
pub mod classifier;

/// Artifact layout and validated pipeline
pub mod pipeline;

/// Inference adapter — raw fields in, display string out
pub mod inferencer;

#[cfg(test)]
pub mod fixtures;
