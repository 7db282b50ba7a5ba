//! Frozen training-time feature schema

use crate::error::{EvServeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// The training-time feature contract, produced once by the training process
/// and read-only for the lifetime of the serving process.
///
/// `categories` records the training-time category order per categorical field
/// explicitly, with the dropped reference level as element 0. Serving never
/// re-derives category order, so one-hot encoding cannot silently diverge from
/// the encoding the model was trained on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSchema {
    /// Numeric field names, in training order
    pub numeric_cols: Vec<String>,
    /// Categorical field names, in training order
    pub categorical_cols: Vec<String>,
    /// Per-field category values in first-appearance order; element 0 is the
    /// dropped reference level and never materializes a column
    pub categories: HashMap<String, Vec<String>>,
    /// Final feature-vector column names (post-encoding), frozen at training time
    pub final_columns: Vec<String>,
}

impl FeatureSchema {
    /// Parse a schema from its JSON artifact and validate it
    pub fn from_json(text: &str) -> Result<Self> {
        let schema: Self = serde_json::from_str(text)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Load a schema artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            EvServeError::ArtifactError(format!("cannot read schema at {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    /// Retained one-hot categories for a field (everything after the dropped
    /// reference level), in training order
    pub fn retained_categories(&self, field: &str) -> &[String] {
        self.categories
            .get(field)
            .and_then(|cats| cats.get(1..))
            .unwrap_or(&[])
    }

    /// Length of the final feature vector
    pub fn width(&self) -> usize {
        self.final_columns.len()
    }

    fn validate(&self) -> Result<()> {
        if self.final_columns.is_empty() {
            return Err(EvServeError::SchemaError(
                "final_columns is empty".to_string(),
            ));
        }
        for field in &self.categorical_cols {
            match self.categories.get(field) {
                Some(cats) if !cats.is_empty() => {}
                _ => {
                    return Err(EvServeError::SchemaError(format!(
                        "categorical field '{}' has no recorded category order",
                        field
                    )));
                }
            }
        }
        Ok(())
    }
}
