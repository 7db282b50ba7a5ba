//! Fitted numeric scaler artifact

use crate::error::{EvServeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Capability interface over a fitted scaler: maps raw numeric values to
/// standardized values. Fitted once at training time; never refit here.
pub trait Scaler: Send + Sync + std::fmt::Debug {
    /// Transform one record's numeric values, in schema `numeric_cols` order
    fn transform(&self, values: &[f64]) -> Result<Vec<f64>>;
}

/// Parameters for one numeric field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: f64,
    pub scale: f64,
}

/// Standard (z-score) scaler: `(x - mean) / scale` per field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    params: Vec<ScalerParams>,
}

impl StandardScaler {
    /// Build from per-field parameters, rejecting degenerate scales
    pub fn new(params: Vec<ScalerParams>) -> Result<Self> {
        for (idx, p) in params.iter().enumerate() {
            if !p.mean.is_finite() || !p.scale.is_finite() || p.scale == 0.0 {
                return Err(EvServeError::ArtifactError(format!(
                    "scaler field {} has invalid parameters (mean={}, scale={})",
                    idx, p.mean, p.scale
                )));
            }
        }
        Ok(Self { params })
    }

    /// Parse a scaler artifact, checking it matches the schema's numeric width
    pub fn from_json(text: &str, expected_fields: usize) -> Result<Self> {
        let scaler: Self = serde_json::from_str(text)?;
        if scaler.params.len() != expected_fields {
            return Err(EvServeError::ArtifactError(format!(
                "scaler has {} fields but schema declares {} numeric columns",
                scaler.params.len(),
                expected_fields
            )));
        }
        Self::new(scaler.params)
    }

    /// Load a scaler artifact from disk
    pub fn load(path: impl AsRef<Path>, expected_fields: usize) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            EvServeError::ArtifactError(format!("cannot read scaler at {}: {}", path.display(), e))
        })?;
        Self::from_json(&text, expected_fields)
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, values: &[f64]) -> Result<Vec<f64>> {
        if values.len() != self.params.len() {
            return Err(EvServeError::SchemaError(format!(
                "expected {} numeric values, got {}",
                self.params.len(),
                values.len()
            )));
        }
        Ok(values
            .iter()
            .zip(&self.params)
            .map(|(v, p)| (v - p.mean) / p.scale)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_transform() {
        let scaler = StandardScaler::new(vec![ScalerParams {
            mean: 50000.0,
            scale: 10000.0,
        }])
        .unwrap();
        let out = scaler.transform(&[60000.0]).unwrap();
        assert_eq!(out, vec![1.0]);
    }

    #[test]
    fn test_zero_scale_rejected() {
        let err = StandardScaler::new(vec![ScalerParams {
            mean: 0.0,
            scale: 0.0,
        }])
        .unwrap_err();
        assert!(matches!(err, EvServeError::ArtifactError(_)));
    }

    #[test]
    fn test_width_mismatch_rejected() {
        let text = r#"{"params": [{"mean": 1.0, "scale": 2.0}]}"#;
        assert!(StandardScaler::from_json(text, 3).is_err());
        assert!(StandardScaler::from_json(text, 1).is_ok());
    }

    #[test]
    fn test_transform_length_checked() {
        let scaler = StandardScaler::new(vec![ScalerParams {
            mean: 0.0,
            scale: 1.0,
        }])
        .unwrap();
        assert!(scaler.transform(&[1.0, 2.0]).is_err());
    }
}
