//! API configuration.

use std::path::PathBuf;

use isl_core::DEFAULT_MIN_CONFIDENCE;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Max request body size
    pub max_body_size: usize,
    /// Directory holding the ONNX models and the label map side file
    pub model_dir: PathBuf,
    /// Directory holding the text-to-sign GIF assets
    pub assets_dir: PathBuf,
    /// Confidence threshold for accepting predictions
    pub min_confidence: f32,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            max_body_size: 10 * 1024 * 1024, // 10MB
            model_dir: PathBuf::from("models"),
            assets_dir: PathBuf::from("text_to_sign"),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_size),
            model_dir: std::env::var("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_dir),
            assets_dir: std::env::var("ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
            min_confidence: std::env::var("MIN_CONFIDENCE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_confidence),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}
