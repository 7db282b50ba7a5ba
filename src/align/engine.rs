//! Feature alignment engine
//!
//! Maps an arbitrary key-value input record onto the fixed-shape, fixed-order
//! numeric feature vector the classifier was trained on. This is the only
//! place train/serve skew can occur; the policies below are load-bearing.

use crate::align::scaler::Scaler;
use crate::align::schema::FeatureSchema;
use crate::error::Result;
use ndarray::Array1;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::warn;

/// Aligns one raw input record to the frozen training-time feature space
#[derive(Debug)]
pub struct FeatureAligner {
    schema: FeatureSchema,
    scaler: Box<dyn Scaler>,
}

impl FeatureAligner {
    pub fn new(schema: FeatureSchema, scaler: Box<dyn Scaler>) -> Self {
        Self { schema, scaler }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Produce the feature vector for a raw record.
    ///
    /// Missing and malformed field values never reject the record: numeric
    /// gaps are imputed with 0.0 and unknown categories collapse to an
    /// all-zero indicator block. Availability is traded for accuracy here on
    /// purpose; degradations are logged at `warn` and otherwise absorbed.
    pub fn align(&self, raw: &Map<String, Value>) -> Result<Array1<f64>> {
        // Numeric completion and coercion, in schema order
        let numeric: Vec<f64> = self
            .schema
            .numeric_cols
            .iter()
            .map(|field| coerce_numeric(field, raw.get(field)))
            .collect();

        // Standardization with the frozen training-time parameters
        let scaled = self.scaler.transform(&numeric)?;

        let mut generated: HashMap<String, f64> =
            HashMap::with_capacity(self.schema.width() + self.schema.categorical_cols.len());

        for (field, value) in self.schema.numeric_cols.iter().zip(&scaled) {
            generated.insert(field.clone(), *value);
        }

        // One-hot projection over retained training categories only; the
        // dropped reference level never gets a column, and any unmatched
        // value (sentinel included) leaves the whole block at zero
        for field in &self.schema.categorical_cols {
            let value = coerce_categorical(raw.get(field));
            let retained = self.schema.retained_categories(field);
            if !value.is_empty() && !retained.iter().any(|c| *c == value) {
                warn!(field = %field, value = %value, "unseen category, encoding as reference level");
            }
            for category in retained {
                let indicator = if value == *category { 1.0 } else { 0.0 };
                generated.insert(format!("{}_{}", field, category), indicator);
            }
        }

        // Reindex over the frozen column list: extraneous generated columns
        // are discarded, missing ones filled with 0.0
        let vector: Vec<f64> = self
            .schema
            .final_columns
            .iter()
            .map(|column| generated.get(column.as_str()).copied().unwrap_or(0.0))
            .collect();

        Ok(Array1::from_vec(vector))
    }
}

/// Coerce a raw value to f64. Absent, null, or malformed values impute 0.0.
fn coerce_numeric(field: &str, value: Option<&Value>) -> f64 {
    match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                warn!(field = %field, value = %s, "malformed numeric value, imputing 0.0");
                0.0
            }
        },
        Some(other) => {
            warn!(field = %field, value = %other, "non-scalar numeric value, imputing 0.0");
            0.0
        }
    }
}

/// Coerce a raw value to a category string. Absent values become the empty
/// string sentinel, which encodes like any other unseen category.
fn coerce_categorical(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(_) => String::new(),
    }
}
