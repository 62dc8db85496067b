//! Prometheus metrics for the recognition server.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "isl_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "isl_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "isl_http_requests_in_flight";

    // WebSocket metrics
    pub const WS_CONNECTIONS_TOTAL: &str = "isl_ws_connections_total";
    pub const WS_CONNECTIONS_ACTIVE: &str = "isl_ws_connections_active";
    pub const WS_MESSAGES_SENT: &str = "isl_ws_messages_sent_total";
    pub const WS_MESSAGES_RECEIVED: &str = "isl_ws_messages_received_total";

    // Recognition metrics
    pub const FRAMES_DECODED_TOTAL: &str = "isl_frames_decoded_total";
    pub const FRAMES_REJECTED_TOTAL: &str = "isl_frames_rejected_total";
    pub const PREDICTIONS_TOTAL: &str = "isl_predictions_total";
    pub const INFERENCE_DURATION_SECONDS: &str = "isl_inference_duration_seconds";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record WebSocket connection.
pub fn record_ws_connection(endpoint: &str) {
    let labels = [("endpoint", endpoint.to_string())];
    counter!(names::WS_CONNECTIONS_TOTAL, &labels).increment(1);
}

/// Update active WebSocket connections gauge.
pub fn set_ws_active_connections(count: i64) {
    gauge!(names::WS_CONNECTIONS_ACTIVE).set(count as f64);
}

/// Record WebSocket message sent.
pub fn record_ws_message_sent(endpoint: &str, message_type: &str) {
    let labels = [
        ("endpoint", endpoint.to_string()),
        ("type", message_type.to_string()),
    ];
    counter!(names::WS_MESSAGES_SENT, &labels).increment(1);
}

/// Record WebSocket message received.
pub fn record_ws_message_received(endpoint: &str) {
    let labels = [("endpoint", endpoint.to_string())];
    counter!(names::WS_MESSAGES_RECEIVED, &labels).increment(1);
}

/// Record a successfully decoded frame.
pub fn record_frame_decoded() {
    counter!(names::FRAMES_DECODED_TOTAL).increment(1);
}

/// Record a frame that could not be decoded or yielded no landmarks.
pub fn record_frame_rejected(reason: &str) {
    let labels = [("reason", reason.to_string())];
    counter!(names::FRAMES_REJECTED_TOTAL, &labels).increment(1);
}

/// Record an emitted prediction.
pub fn record_prediction(label: &str) {
    let labels = [("label", label.to_string())];
    counter!(names::PREDICTIONS_TOTAL, &labels).increment(1);
}

/// Record classifier inference duration.
pub fn record_inference_duration(duration_secs: f64) {
    histogram!(names::INFERENCE_DURATION_SECONDS).record(duration_secs);
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
