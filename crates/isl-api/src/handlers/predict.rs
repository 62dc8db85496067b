//! Single-vector prediction handler.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use isl_core::{top_prediction, FeatureVector};

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Request body: one flat landmark vector.
#[derive(Deserialize)]
pub struct PredictRequest {
    pub landmarks: Vec<f32>,
}

/// Prediction reply.
#[derive(Serialize)]
pub struct PredictResponse {
    pub label: String,
    pub confidence: f32,
}

/// Classify a single landmark vector.
///
/// The vector is tiled to a full sequence before inference, so the reply
/// reflects a held-still sign rather than a motion.
pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> ApiResult<Json<PredictResponse>> {
    let vector = FeatureVector::from_raw(req.landmarks)
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let start = Instant::now();
    let probs = state.recognizer.probs_for_vector(&vector)?;
    metrics::record_inference_duration(start.elapsed().as_secs_f64());

    let top = top_prediction(&probs)
        .ok_or_else(|| ApiError::internal("classifier returned no probabilities"))?;
    let label = state.recognizer.label(top.class).to_string();
    metrics::record_prediction(&label);

    Ok(Json(PredictResponse {
        label,
        confidence: top.confidence,
    }))
}
