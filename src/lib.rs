//! evserve - serving engine for a pretrained EV market-segment classifier
//!
//! Serves predictions from a frozen, externally trained tabular classifier:
//! a raw, partially specified car record is aligned onto the exact feature
//! space the model was trained on, classified, and answered with a segment
//! label plus catalog recommendations.
//!
//! # Modules
//!
//! - [`align`] - schema descriptor, fitted scaler, feature alignment engine
//! - [`classifier`] - opaque classifier capability + artifact adapters
//! - [`inference`] - predictor wiring and artifact loading
//! - [`catalog`] - static car dataset and recommendation filtering
//! - [`server`] - HTTP server (axum) with readiness reporting

pub mod error;

pub mod align;
pub mod catalog;
pub mod classifier;
pub mod inference;
pub mod server;

pub use error::{EvServeError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::align::{FeatureAligner, FeatureSchema, Scaler, ScalerParams, StandardScaler};
    pub use crate::catalog::{Catalog, Recommendation};
    pub use crate::classifier::{Classifier, RandomForest};
    pub use crate::error::{EvServeError, Result};
    pub use crate::inference::Predictor;
    pub use crate::server::{create_router, AppState, ServerConfig};
}
