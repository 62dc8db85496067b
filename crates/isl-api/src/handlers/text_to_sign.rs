//! Text-to-sign handler.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::text_to_sign::{lookup, TextToSignResponse};

#[derive(Deserialize)]
pub struct TextToSignRequest {
    pub text: String,
}

/// Convert free text to a sign-language GIF or a fingerspelling plan.
pub async fn text_to_sign(
    State(state): State<AppState>,
    Json(req): Json<TextToSignRequest>,
) -> ApiResult<Json<TextToSignResponse>> {
    if req.text.trim().is_empty() {
        return Err(ApiError::validation("text must not be empty"));
    }
    Ok(Json(lookup(&state.config.assets_dir, &req.text)))
}
