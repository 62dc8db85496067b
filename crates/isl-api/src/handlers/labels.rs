//! Label map handler.

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/// Return the class index to sign name mapping the classifier was trained
/// with.
pub async fn list_labels(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "labels": state.recognizer.label_map() }))
}
