//! Application state.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::service::RecognitionService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub recognizer: Arc<RecognitionService>,
}

impl AppState {
    /// Create new application state, loading every model artifact.
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let recognizer = RecognitionService::load(&config.model_dir, config.min_confidence)?;
        Ok(Self {
            config,
            recognizer: Arc::new(recognizer),
        })
    }
}
