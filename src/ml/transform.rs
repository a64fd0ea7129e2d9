// ============================================================
// Layer 5 — Column Transformer
// ============================================================
// The preprocessing half of the pipeline. An ordered list of
// stages, each owning a contiguous slice of the schema:
//
//   stage "num"  columns [koi_period, koi_prad, ...]  → numeric
//   stage "cat"  columns [koi_tce_delivname]          → one_hot
//
// The schema's column order IS the concatenation of the stage
// column lists, in stage order. Transforming a row walks the
// stages in that order and appends each stage's output to one
// dense feature vector:
//
//   numeric     → one value per column, optionally standardised
//                 as (x - mean) / scale
//   one_hot     → one 0/1 indicator per known category
//   passthrough → one value per column, unchanged
//
// Stages index their columns positionally — the reason the
// normalizer must never let the request's field order through.

use anyhow::{anyhow, bail, ensure, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::row::{CellValue, NormalizedRow};

/// Ordered preprocessing stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTransformer {
    pub transformers: Vec<TransformerStage>,
}

/// One named stage and the columns it consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerStage {
    pub name:    String,
    pub columns: Vec<String>,
    #[serde(flatten)]
    pub encoder: StageEncoder,
}

/// What a stage does to its columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageEncoder {
    Numeric {
        #[serde(default)]
        scale: Option<StandardScaler>,
    },
    OneHot {
        /// One category list per column
        categories:     Vec<Vec<String>>,
        #[serde(default)]
        handle_unknown: HandleUnknown,
    },
    Passthrough,
}

/// Per-column standardisation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean:  Vec<f64>,
    pub scale: Vec<f64>,
}

/// What a one-hot stage does with a category it wasn't fit on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    /// Emit all zeros for the column
    #[default]
    Ignore,
    /// Fail the request
    Error,
}

impl StageEncoder {
    /// True if the stage consumes text cells
    pub fn is_categorical(&self) -> bool {
        matches!(self, StageEncoder::OneHot { .. })
    }
}

impl TransformerStage {
    /// Number of output features this stage appends
    pub fn output_width(&self) -> usize {
        match &self.encoder {
            StageEncoder::Numeric { .. } | StageEncoder::Passthrough => self.columns.len(),
            StageEncoder::OneHot { categories, .. } => categories.iter().map(Vec::len).sum(),
        }
    }

    /// Check parameter shapes and kind agreement with the declared
    /// categorical columns.
    fn validate(&self, categorical: &[String]) -> Result<()> {
        let n = self.columns.len();
        for col in &self.columns {
            let declared = categorical.iter().any(|c| c == col);
            if self.encoder.is_categorical() {
                ensure!(
                    declared,
                    "Stage '{}' one-hot encodes column '{col}', which is not a categorical feature",
                    self.name
                );
            } else {
                ensure!(
                    !declared,
                    "Stage '{}' treats categorical feature '{col}' as numeric",
                    self.name
                );
            }
        }

        match &self.encoder {
            StageEncoder::Numeric { scale: Some(s) } => {
                ensure!(
                    s.mean.len() == n && s.scale.len() == n,
                    "Stage '{}' has {} columns but scaler has {} means and {} scales",
                    self.name, n, s.mean.len(), s.scale.len()
                );
            }
            StageEncoder::OneHot { categories, .. } => {
                ensure!(
                    categories.len() == n,
                    "Stage '{}' has {} columns but {} category lists",
                    self.name, n, categories.len()
                );
            }
            StageEncoder::Numeric { scale: None } | StageEncoder::Passthrough => {}
        }
        Ok(())
    }

    /// Append this stage's output for `cells` (this stage's slice of the row)
    fn encode(&self, cells: &[(String, CellValue)], out: &mut Vec<f64>) -> Result<()> {
        for (j, (name, cell)) in cells.iter().enumerate() {
            match &self.encoder {
                StageEncoder::Numeric { scale } => {
                    let x = numeric_cell(name, cell)?;
                    let x = match scale {
                        Some(s) => standardise(x, s.mean[j], s.scale[j]),
                        None => x,
                    };
                    out.push(x);
                }
                StageEncoder::Passthrough => out.push(numeric_cell(name, cell)?),
                StageEncoder::OneHot { categories, handle_unknown } => {
                    let value = cell.as_text().ok_or_else(|| {
                        anyhow!("Column '{name}' holds a number where a category was expected")
                    })?;
                    let known = &categories[j];
                    let hit = known.iter().position(|c| c == value);
                    if hit.is_none() && *handle_unknown == HandleUnknown::Error {
                        bail!("Found unknown category '{value}' in column '{name}'");
                    }
                    out.extend((0..known.len()).map(|k| if Some(k) == hit { 1.0 } else { 0.0 }));
                }
            }
        }
        Ok(())
    }
}

impl ColumnTransformer {
    /// Expected column order: stage column lists concatenated in stage order
    pub fn expected_columns(&self) -> Vec<String> {
        self.transformers
            .iter()
            .flat_map(|t| t.columns.iter().cloned())
            .collect()
    }

    /// Total length of the dense feature vector
    pub fn output_width(&self) -> usize {
        self.transformers.iter().map(TransformerStage::output_width).sum()
    }

    /// Structural checks run once at load time
    pub fn validate(&self, categorical: &[String]) -> Result<()> {
        ensure!(!self.transformers.is_empty(), "Preprocessor has no transformer stages");

        let mut seen = HashSet::new();
        for col in self.transformers.iter().flat_map(|t| &t.columns) {
            ensure!(
                seen.insert(col.as_str()),
                "Column '{col}' is consumed by more than one stage"
            );
        }
        ensure!(!seen.is_empty(), "Preprocessor stages declare no columns");

        for stage in &self.transformers {
            stage.validate(categorical)?;
        }
        Ok(())
    }

    /// Transform one normalized row into the dense feature vector.
    ///
    /// The row must be laid out in `expected_columns()` order; a
    /// name mismatch at any position is reported rather than
    /// silently encoding the wrong column.
    pub fn transform(&self, row: &NormalizedRow) -> Result<Vec<f64>> {
        let cells = row.cells();
        let mut out = Vec::with_capacity(self.output_width());
        let mut offset = 0usize;

        for stage in &self.transformers {
            let end = offset + stage.columns.len();
            ensure!(
                end <= cells.len(),
                "Row has {} columns, stage '{}' needs columns up to {}",
                cells.len(), stage.name, end
            );
            let slice = &cells[offset..end];
            for (expected, (actual, _)) in stage.columns.iter().zip(slice) {
                ensure!(
                    expected == actual,
                    "Column order mismatch: stage '{}' expected '{expected}', row has '{actual}'",
                    stage.name
                );
            }
            stage.encode(slice, &mut out)?;
            offset = end;
        }

        ensure!(
            offset == cells.len(),
            "Row has {} columns but the preprocessor consumes {}",
            cells.len(), offset
        );
        Ok(out)
    }
}

fn numeric_cell(name: &str, cell: &CellValue) -> Result<f64> {
    cell.as_f64()
        .ok_or_else(|| anyhow!("Column '{name}' holds text where a number was expected"))
}

/// StandardScaler semantics: a zero scale leaves the centred value as is
fn standardise(x: f64, mean: f64, scale: f64) -> f64 {
    let scale = if scale == 0.0 { 1.0 } else { scale };
    (x - mean) / scale
}
