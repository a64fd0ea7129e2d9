// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the bytes of a request and the row the
// pipeline evaluates:
//
//   request body (form or JSON)
//       │
//       ▼
//   decoder      → RawFields (field name → raw string)
//       │
//       ▼
//   normalizer   → NormalizedRow (schema order, coerced, filled)
//       │
//       ▼
//   ml::pipeline → label
//
// The catalog sits to the side: it only feeds the form renderer.

/// Decodes form-encoded and JSON request bodies
pub mod decoder;

/// Reindexes, coerces and fills raw fields onto the schema
pub mod normalizer;

/// Static field name → label/tooltip table
pub mod catalog;
