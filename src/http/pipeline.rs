//! The per-call request pipeline.
//!
//! # Data Flow
//! ```text
//! ApiRequest
//!     → SessionGuard::authorize (bearer header, read per call)
//!     → Transport::send
//!         ✗ TransportError ⇒ ApiError::Transport
//!     → SessionGuard::inspect (401 ⇒ credential cleared, redirect)
//!     → status check
//!         ✗ non-2xx ⇒ ApiError (server message preferred)
//!     → ApiResponse
//! ```
//!
//! # Design Decisions
//! - Steps run strictly in order for one call; distinct calls are independent
//! - No retries on any verb, idempotent or not
//! - A 401 still fails the call after the teardown side effect

use std::sync::Arc;
use std::time::Instant;

use crate::error::ApiError;
use crate::http::request::ApiRequest;
use crate::http::response::ApiResponse;
use crate::http::transport::Transport;
use crate::observability::metrics;
use crate::session::SessionGuard;

/// Transport plus session handling, shared by every resource client.
#[derive(Clone)]
pub struct Pipeline {
    transport: Arc<dyn Transport>,
    session: SessionGuard,
}

impl Pipeline {
    pub fn new(transport: Arc<dyn Transport>, session: SessionGuard) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionGuard {
        &self.session
    }

    /// Run one request through auth, transport, inspection and normalization.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.session.authorize(&mut request)?;

        let request_id = request.id;
        let method = request.method.as_str();
        let url = request.url.clone();
        tracing::debug!(%request_id, method, %url, "Sending request");

        let started = Instant::now();
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_transport_error(method, started.elapsed());
                tracing::warn!(%request_id, method, %url, error = %e, "Request failed before a response");
                return Err(ApiError::from(e));
            }
        };
        metrics::record_request(method, response.status, started.elapsed());

        self.session.inspect(&response);

        if response.is_success() {
            tracing::debug!(%request_id, status = response.status, "Request completed");
            Ok(response)
        } else {
            let err = ApiError::from_status(response.status, &response.body);
            tracing::debug!(%request_id, status = response.status, error = %err, "Server reported failure");
            Err(err)
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("login_path", &self.session.login_path())
            .finish()
    }
}
