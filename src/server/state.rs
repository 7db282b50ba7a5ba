//! Application state: artifacts loaded once, read-only thereafter

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::inference::Predictor;
use tracing::{error, info};

use super::ServerConfig;

/// Shared state behind every handler.
///
/// The predictor and catalog are loaded exactly once, before the listener
/// binds. A failed load leaves its slot `None` and the service permanently
/// not-ready; there is nothing to retry against, the artifacts are static
/// files. No locks: nothing mutates after initialization.
pub struct AppState {
    pub config: ServerConfig,
    pub predictor: Option<Arc<Predictor>>,
    pub catalog: Option<Arc<Catalog>>,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Load startup artifacts. Never panics: load failures are logged and
    /// reported through readiness instead.
    pub fn initialize(config: ServerConfig) -> Self {
        let predictor = match Predictor::load(&config.artifacts_dir) {
            Ok(p) => Some(Arc::new(p)),
            Err(e) => {
                error!(
                    dir = %config.artifacts_dir.display(),
                    error = %e,
                    "failed to load predictor artifacts, service will report unavailable"
                );
                None
            }
        };

        let catalog = match Catalog::load(&config.catalog_path) {
            Ok(c) => Some(Arc::new(c)),
            Err(e) => {
                error!(
                    path = %config.catalog_path.display(),
                    error = %e,
                    "failed to load car catalog, service will report unavailable"
                );
                None
            }
        };

        if predictor.is_some() && catalog.is_some() {
            info!("all startup artifacts loaded, service ready");
        }

        Self {
            config,
            predictor,
            catalog,
            started_at: chrono::Utc::now(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.predictor.is_some() && self.catalog.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_artifacts_leave_state_not_ready() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            artifacts_dir: PathBuf::from("/nonexistent/artifacts"),
            catalog_path: PathBuf::from("/nonexistent/catalog.csv"),
        };
        let state = AppState::initialize(config);
        assert!(!state.is_ready());
        assert!(state.predictor.is_none());
        assert!(state.catalog.is_none());
    }
}
