// ============================================================
// Layer 3 — Normalized Row
// ============================================================
// A single-record table laid out exactly in schema order.
// Every cell is filled: the normalizer has already replaced
// missing values with their per-column default, so nothing
// downstream ever sees a hole.

/// Default for a numeric cell that was absent or unparseable
pub const NUMERIC_DEFAULT: f64 = 0.0;

/// Default for a categorical cell that was absent
pub const CATEGORICAL_DEFAULT: &str = "unknown";

/// One filled cell of the normalized row
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Numeric(f64),
    Categorical(String),
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Numeric(v) => Some(*v),
            CellValue::Categorical(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Categorical(s) => Some(s.as_str()),
            CellValue::Numeric(_) => None,
        }
    }
}

/// Column name + value pairs in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    cells: Vec<(String, CellValue)>,
}

impl NormalizedRow {
    /// Build a row from cells that are already in schema order
    pub fn from_cells(cells: Vec<(String, CellValue)>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[(String, CellValue)] {
        &self.cells
    }
}

#[cfg(test)]
impl NormalizedRow {
    /// Cell at a schema position
    pub fn at(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index).map(|(_, v)| v)
    }

    /// Cell by column name
    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(n, _)| n.as_str())
    }
}
