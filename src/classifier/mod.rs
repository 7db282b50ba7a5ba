//! Opaque pretrained classifier
//!
//! The model is a training-time artifact; serving only invokes it. The
//! [`Classifier`] trait is the capability seam, with one concrete adapter per
//! serialization format.

pub mod forest;

pub use forest::RandomForest;

use crate::error::Result;
use ndarray::ArrayView1;

/// Capability interface over a trained classifier artifact
pub trait Classifier: Send + Sync + std::fmt::Debug {
    /// Predict a class label for one aligned feature vector
    fn predict(&self, features: ArrayView1<'_, f64>) -> Result<String>;

    /// Feature-vector width the artifact was trained on
    fn n_features(&self) -> usize;
}
