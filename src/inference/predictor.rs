//! Predictor: artifact loading and single-record inference

use crate::align::{FeatureAligner, FeatureSchema, StandardScaler};
use crate::classifier::{Classifier, RandomForest};
use crate::error::{EvServeError, Result};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::info;

/// Artifact file names within the artifact directory, fixed by convention
/// with the training process
const SCHEMA_FILE: &str = "schema.json";
const SCALER_FILE: &str = "scaler.json";
const MODEL_FILE: &str = "model.json";

/// Serving-side predictor: frozen schema + fitted scaler + trained classifier,
/// loaded once at startup and shared read-only across requests
#[derive(Debug)]
pub struct Predictor {
    aligner: FeatureAligner,
    classifier: Box<dyn Classifier>,
}

impl Predictor {
    /// Assemble a predictor from already-loaded artifacts, checking that the
    /// classifier's expected width matches the schema's final column count
    pub fn new(
        schema: FeatureSchema,
        scaler: Box<dyn crate::align::Scaler>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self> {
        if classifier.n_features() != schema.width() {
            return Err(EvServeError::SchemaError(format!(
                "model expects {} features but schema declares {} final columns",
                classifier.n_features(),
                schema.width()
            )));
        }
        Ok(Self {
            aligner: FeatureAligner::new(schema, scaler),
            classifier,
        })
    }

    /// Load all three artifacts from a directory. Any missing or corrupt
    /// artifact fails the whole load; callers must treat that as a permanent
    /// not-ready condition, not a per-request error.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let schema = FeatureSchema::load(dir.join(SCHEMA_FILE))?;
        let scaler = StandardScaler::load(dir.join(SCALER_FILE), schema.numeric_cols.len())?;
        let model = RandomForest::load(dir.join(MODEL_FILE))?;

        info!(
            dir = %dir.display(),
            numeric = schema.numeric_cols.len(),
            categorical = schema.categorical_cols.len(),
            final_columns = schema.width(),
            "predictor artifacts loaded"
        );

        Self::new(schema, Box::new(scaler), Box::new(model))
    }

    /// Align one raw record and predict its segment label
    pub fn predict_segment(&self, raw: &Map<String, Value>) -> Result<String> {
        let vector = self.aligner.align(raw)?;
        self.classifier.predict(vector.view())
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.aligner.schema()
    }
}
