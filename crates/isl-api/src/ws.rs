//! WebSocket streaming inference.
//!
//! One connection carries one recognition session: the client streams
//! base64-encoded frames, the server keeps a per-connection sliding window
//! and smoother and answers every frame with either a `collecting` progress
//! reply or a smoothed prediction. Messages are handled one at a time, so a
//! session never races against itself.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Instant;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use isl_core::{PredictionSmoother, SequenceWindow, SEQUENCE_LEN};
use isl_vision::decode_base64_frame;

use crate::metrics;
use crate::state::AppState;

/// Global counter for active WebSocket connections.
static ACTIVE_WS_CONNECTIONS: AtomicI64 = AtomicI64::new(0);

/// One streamed frame from the client.
#[derive(Debug, Deserialize)]
pub struct WsFramePayload {
    #[serde(default)]
    pub image: Option<String>,
}

/// Reply to one streamed frame.
#[derive(Debug, Serialize)]
pub struct WsReply {
    pub label: String,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needed: Option<usize>,
}

impl WsReply {
    fn error() -> Self {
        Self {
            label: "error".to_string(),
            confidence: 0.0,
            progress: None,
            needed: None,
        }
    }

    fn collecting(progress: usize) -> Self {
        Self {
            label: "collecting".to_string(),
            confidence: 0.0,
            progress: Some(progress),
            needed: Some(SEQUENCE_LEN),
        }
    }

    fn prediction(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
            progress: None,
            needed: None,
        }
    }

    fn kind(&self) -> &'static str {
        match self.label.as_str() {
            "error" => "error",
            "collecting" => "collecting",
            _ => "prediction",
        }
    }
}

/// WebSocket recognition endpoint.
pub async fn ws_recognize(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let count = ACTIVE_WS_CONNECTIONS.fetch_add(1, Ordering::SeqCst) + 1;
    metrics::set_ws_active_connections(count);
    metrics::record_ws_connection("recognize");

    ws.on_upgrade(|socket| async move {
        handle_recognize_socket(socket, state).await;
        let count = ACTIVE_WS_CONNECTIONS.fetch_sub(1, Ordering::SeqCst) - 1;
        metrics::set_ws_active_connections(count);
    })
}

/// Handle one recognition session.
async fn handle_recognize_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    let mut window = SequenceWindow::new();
    let mut smoother = PredictionSmoother::new(state.recognizer.min_confidence());

    info!("WebSocket recognition session started");

    while let Some(msg) = receiver.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) | Ok(Message::Binary(_)) => continue,
        };
        metrics::record_ws_message_received("recognize");

        let reply = match serde_json::from_str::<WsFramePayload>(&text) {
            Ok(payload) => handle_frame(&state, &mut window, &mut smoother, payload),
            Err(e) => {
                debug!("Malformed frame message: {}", e);
                Some(WsReply::error())
            }
        };

        let Some(reply) = reply else { continue };
        metrics::record_ws_message_sent("recognize", reply.kind());

        let json = match serde_json::to_string(&reply) {
            Ok(j) => j,
            Err(_) => continue,
        };
        if sender.send(Message::Text(json)).await.is_err() {
            warn!("WebSocket send failed, client disconnected");
            break;
        }
    }

    info!("WebSocket recognition session ended");
}

/// Process one frame and pick the reply, if any.
///
/// Frames without an `image` field are skipped silently. Frames without a
/// detectable person leave the window untouched but still yield a status
/// reply, mirroring live capture where the signer briefly leaves the frame.
fn handle_frame(
    state: &AppState,
    window: &mut SequenceWindow,
    smoother: &mut PredictionSmoother,
    payload: WsFramePayload,
) -> Option<WsReply> {
    let image = payload.image?;

    let frame = match decode_base64_frame(&image) {
        Ok(frame) => frame,
        Err(e) => {
            debug!("Frame decode failed: {}", e);
            metrics::record_frame_rejected("decode");
            return Some(WsReply::error());
        }
    };
    metrics::record_frame_decoded();

    match state.recognizer.extract(&frame) {
        Ok(Some(vector)) => window.push(vector),
        Ok(None) => {
            metrics::record_frame_rejected("no_person");
        }
        Err(e) => {
            warn!("Landmark extraction failed: {}", e);
            metrics::record_frame_rejected("extraction");
            return Some(WsReply::error());
        }
    }

    if !window.is_saturated() {
        return Some(WsReply::collecting(window.len()));
    }

    let start = Instant::now();
    let probs = match state.recognizer.probs_for_window(window) {
        Ok(probs) => probs,
        Err(e) => {
            warn!("Classification failed: {}", e);
            return Some(WsReply::error());
        }
    };
    metrics::record_inference_duration(start.elapsed().as_secs_f64());

    match smoother.smooth(&probs) {
        Some(prediction) => {
            let label = state.recognizer.label(prediction.class);
            metrics::record_prediction(label);
            Some(WsReply::prediction(label, prediction.confidence))
        }
        None => Some(WsReply::error()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_payload_tolerates_missing_image() {
        let payload: WsFramePayload = serde_json::from_str("{}").unwrap();
        assert!(payload.image.is_none());
    }

    #[test]
    fn test_collecting_reply_shape() {
        let reply = WsReply::collecting(7);
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["label"], "collecting");
        assert_eq!(json["confidence"], 0.0);
        assert_eq!(json["progress"], 7);
        assert_eq!(json["needed"], 30);
    }

    #[test]
    fn test_prediction_reply_omits_progress_fields() {
        let reply = WsReply::prediction("hello", 0.92);
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["label"], "hello");
        assert!(json.get("progress").is_none());
        assert!(json.get("needed").is_none());
    }
}
