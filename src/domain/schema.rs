// ============================================================
// Layer 3 — Feature Schema
// ============================================================
// The ordered sequence of columns the pipeline was trained on.
//
// Every column is either:
//   - Categorical → a free-text value from a fixed enumerated
//                   list of column names (e.g. koi_tce_delivname)
//   - Numeric     → everything else, coerced to f64
//
// The order matters. Some stages of the pipeline index columns
// positionally, so the normalized row must be laid out in exactly
// this order no matter how the request ordered its fields.

use serde::Serialize;

/// How a column's raw value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl ColumnKind {
    /// Short lowercase name, used by the CLI and the JSON API
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric     => "numeric",
            ColumnKind::Categorical => "categorical",
        }
    }
}

/// One named column of the schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// The ordered column set, captured once when the pipeline is loaded
/// and never re-derived per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<Column>,
}

impl FeatureSchema {
    /// Build a schema from an ordered list of column names.
    /// A column is categorical if it appears in `categorical`,
    /// numeric otherwise.
    ///
    /// Example:
    ///   let s = FeatureSchema::new(["a", "b", "kind"], &["kind"]);
    ///   // a, b → Numeric; kind → Categorical
    pub fn new<I, S>(ordered: I, categorical: &[impl AsRef<str>]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = ordered
            .into_iter()
            .map(|name| {
                let name: String = name.into();
                let kind = if categorical.iter().any(|c| c.as_ref() == name) {
                    ColumnKind::Categorical
                } else {
                    ColumnKind::Numeric
                };
                Column { name, kind }
            })
            .collect();
        Self { columns }
    }

    /// Columns in pipeline order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in pipeline order
    #[cfg(test)]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}
