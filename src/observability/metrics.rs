//! Metrics collection.
//!
//! # Responsibilities
//! - Define client metrics (requests, latency, session invalidations)
//! - Record through the `metrics` facade; the embedding application installs
//!   whichever recorder/exporter it wants
//!
//! # Metrics
//! - `pelada_client_requests_total` (counter): requests by method, status
//! - `pelada_client_request_duration_seconds` (histogram): latency by method
//! - `pelada_client_transport_errors_total` (counter): failures below HTTP
//! - `pelada_client_session_invalidations_total` (counter): 401 teardowns

use metrics::{counter, histogram};
use std::time::Duration;

/// Record a completed request.
pub fn record_request(method: &'static str, status: u16, elapsed: Duration) {
    counter!(
        "pelada_client_requests_total",
        "method" => method,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("pelada_client_request_duration_seconds", "method" => method).record(elapsed.as_secs_f64());
}

/// Record a request that never got a response.
pub fn record_transport_error(method: &'static str, elapsed: Duration) {
    counter!("pelada_client_transport_errors_total", "method" => method).increment(1);
    histogram!("pelada_client_request_duration_seconds", "method" => method).record(elapsed.as_secs_f64());
}

/// Record a session torn down by a 401.
pub fn record_session_invalidated() {
    counter!("pelada_client_session_invalidations_total").increment(1);
}
