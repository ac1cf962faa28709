//! Wire transport.
//!
//! # Responsibilities
//! - Put an [`ApiRequest`] on the wire and hand back status + body
//! - Enforce the configured request and connect timeouts
//!
//! # Design Decisions
//! - Object-safe trait (`BoxFuture`) so fakes can stand in for the network
//! - Non-2xx statuses are responses, not errors; only failures below HTTP
//!   become [`TransportError`]
//! - One reqwest client per process, shared by every resource client

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use reqwest::Client;

use crate::config::TimeoutConfig;
use crate::error::{SetupError, TransportError};
use crate::http::request::ApiRequest;
use crate::http::response::ApiResponse;

/// Sends requests. Implementations must be cheap to share behind an `Arc`.
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, Result<ApiResponse, TransportError>>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build the transport. Failure here is fatal to client setup.
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, SetupError> {
        let client = Client::builder()
            .timeout(timeouts.request())
            .connect_timeout(timeouts.connect())
            .user_agent(concat!("pelada-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url)
            .headers(request.headers);

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, Result<ApiResponse, TransportError>> {
        self.execute(request).boxed()
    }
}
