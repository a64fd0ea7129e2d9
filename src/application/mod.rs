// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers for the two things the
// screener does:
//
//   predict_use_case — decode a request, run the predictor,
//                      and guard the result: a failure becomes
//                      an error string, never a failed request
//   serve_use_case   — resolve configuration, load the pipeline
//                      once, build the runtime and serve HTTP
//
// Rules for this layer:
//   - No pipeline internals here (that's Layer 5)
//   - No HTML or routing here (that's Layer 1)
//   - Only workflow coordination

/// Guarded prediction workflow
pub mod predict_use_case;

/// Web server startup workflow
pub mod serve_use_case;
