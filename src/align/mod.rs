//! Feature alignment
//!
//! Reproduces, at serving time and from untrusted partial input, the exact
//! feature space (column set, order, encoding, scaling) that existed at
//! training time:
//! - [`FeatureSchema`] - frozen training-time feature contract
//! - [`StandardScaler`] - fitted numeric standardization artifact
//! - [`FeatureAligner`] - raw record to fixed-shape feature vector

mod engine;
mod scaler;
mod schema;

pub use engine::FeatureAligner;
pub use scaler::{Scaler, ScalerParams, StandardScaler};
pub use schema::FeatureSchema;
