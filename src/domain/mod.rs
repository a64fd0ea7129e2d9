// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs and traits that define what the screener
// works with: the ordered feature schema, the raw fields a
// request carries, the normalized row handed to the pipeline,
// and the verdict that comes back out.
//
// Rules for this layer:
//   - NO axum, tokio or serde_json here
//   - NO file I/O or network calls
//   - NO model evaluation code
//   - Only plain Rust structs, enums, and traits
//
// Think of this layer as the "dictionary" of the system —
// it defines what things ARE, not how they work.

// Ordered column set the pipeline was fit with
pub mod schema;

// Field name → raw string value, as submitted
pub mod input;

// A single record conforming exactly to the schema
pub mod row;

// Binary label and the display string it maps to
pub mod prediction;

// Core abstractions (traits) that other layers implement
pub mod traits;
