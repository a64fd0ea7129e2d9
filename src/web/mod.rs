// ============================================================
// Layer 1 — Web Presentation Layer
// ============================================================
// The HTTP face of the screener. Thin on purpose: handlers
// pull the body and content type off the request, hand them to
// the PredictUseCase, and render whatever comes back.
//
//   routes.rs — axum router and handlers
//   page.rs   — the HTML form and result rendering

/// axum router and request handlers
pub mod routes;

/// HTML page rendering
pub mod page;

pub use routes::router;
