// ============================================================
// Layer 4 — Row Normalizer
// ============================================================
// Maps a flat dictionary of raw string fields onto the exact
// ordered column set the pipeline was fit with.
//
// Steps (applied per schema column, in schema order):
//   1. Reindex  — look the column up in the raw fields;
//                 fields the schema doesn't know are never read
//   2. Coerce   — numeric columns are parsed as f64; text that
//                 doesn't parse to a finite value is "missing"
//   3. Fill     — missing numeric  → 0.0
//                 missing category → "unknown"
//
// The walk is driven by the schema, never by the raw mapping,
// so the order of the request's fields cannot leak into the row.

use crate::domain::input::RawFields;
use crate::domain::row::{CellValue, NormalizedRow, CATEGORICAL_DEFAULT, NUMERIC_DEFAULT};
use crate::domain::schema::{ColumnKind, FeatureSchema};

/// Reindexes raw fields onto a fixed schema.
/// Holds the schema captured at load time; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Normalizer {
    schema: FeatureSchema,
}

impl Normalizer {
    pub fn new(schema: FeatureSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Build the normalized row for one request.
    /// Never fails: every problem with a single field degrades
    /// to that column's default.
    pub fn normalize(&self, raw: &RawFields) -> NormalizedRow {
        let cells = self
            .schema
            .columns()
            .iter()
            .map(|col| {
                let value = raw.get(&col.name);
                let cell = match col.kind {
                    ColumnKind::Numeric => CellValue::Numeric(
                        value.and_then(coerce_numeric).unwrap_or(NUMERIC_DEFAULT),
                    ),
                    ColumnKind::Categorical => CellValue::Categorical(
                        coerce_categorical(value).unwrap_or(CATEGORICAL_DEFAULT).to_string(),
                    ),
                };
                (col.name.clone(), cell)
            })
            .collect();

        NormalizedRow::from_cells(cells)
    }
}

/// Parse a raw numeric field.
///
/// Surrounding whitespace is ignored. Returns None ("missing") for
/// empty text, anything that isn't a float literal, and any
/// non-finite result (NaN, "inf", or a literal that overflows f64).
/// The scaler and the linear model turn infinities into NaN scores.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A categorical field that is blank after trimming counts as absent.
/// Anything else is kept verbatim; category matching is exact.
///
/// Blank text is folded into "unknown" rather than passed through as
/// an empty category. A fitted encoder never saw "" as a category
/// either, so both land in the same unseen-category path, and
/// "unknown" is what an absent field already becomes.
fn coerce_categorical(raw: Option<&str>) -> Option<&str> {
    raw.filter(|v| !v.trim().is_empty())
}
