//! Inference wiring
//!
//! [`Predictor`] owns the three startup artifacts (schema, scaler, classifier)
//! and runs one raw record through alignment and the classifier.

mod predictor;

pub use predictor::Predictor;
