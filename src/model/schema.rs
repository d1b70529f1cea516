//! Feature schema
//!
//! The encoding a model was trained with ships inside its bundle, so
//! scoring always replays the exact training-time column layout.

use crate::features::{FieldValue, RaceEntry};
use crate::model::FeatureMatrix;
use crate::{DriverCode, FinishlineError, Result};
use serde::{Deserialize, Serialize};

/// How one raw column becomes matrix cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnEncoding {
    /// Single cell carrying the value as-is
    Numeric,
    /// One cell per training-time category, hot cell set to 1.0
    OneHot { categories: Vec<String> },
}

impl ColumnEncoding {
    fn width(&self) -> usize {
        match self {
            ColumnEncoding::Numeric => 1,
            ColumnEncoding::OneHot { categories } => categories.len(),
        }
    }

    fn encode(
        &self,
        name: &str,
        value: &FieldValue,
        code: &DriverCode,
        out: &mut Vec<f64>,
    ) -> Result<()> {
        match (self, value) {
            (ColumnEncoding::Numeric, FieldValue::Number(v)) => {
                out.push(*v);
                Ok(())
            }
            (ColumnEncoding::OneHot { categories }, FieldValue::Category(cat)) => {
                let start = out.len();
                out.resize(start + categories.len(), 0.0);
                match categories.iter().position(|c| c == cat) {
                    Some(pos) => out[start + pos] = 1.0,
                    // Category unseen in training encodes as all zeros
                    None => log::warn!(
                        "Unknown {} category {:?} for {}, encoding as zeros",
                        name,
                        cat,
                        code
                    ),
                }
                Ok(())
            }
            _ => Err(FinishlineError::Schema(format!(
                "Column {:?} has the wrong kind of value for {}",
                name, code
            ))),
        }
    }
}

/// One raw column and its encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub encoding: ColumnEncoding,
}

/// Ordered column layout a model was trained on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub columns: Vec<ColumnSpec>,
}

impl FeatureSchema {
    /// Total encoded row width
    pub fn width(&self) -> usize {
        self.columns.iter().map(|c| c.encoding.width()).sum()
    }

    /// Encode raw entries into a feature matrix, one row per entry
    pub fn transform(&self, entries: &[RaceEntry]) -> Result<FeatureMatrix> {
        let mut matrix = FeatureMatrix::new(self.width());
        let mut row = Vec::with_capacity(self.width());

        for entry in entries {
            row.clear();
            for column in &self.columns {
                let value = entry.field(&column.name).ok_or_else(|| {
                    FinishlineError::Schema(format!(
                        "Missing value for column {:?} (driver {})",
                        column.name, entry.code
                    ))
                })?;
                column
                    .encoding
                    .encode(&column.name, &value, &entry.code, &mut row)?;
            }
            matrix.push_row(&row);
        }

        Ok(matrix)
    }
}
