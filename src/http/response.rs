//! Response decoding.
//!
//! # Responsibilities
//! - Hold status and raw body as received from the transport
//! - Decode JSON bodies into typed values, mapping failures to [`ApiError::Decode`]

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::envelope::ListBody;

/// A response as returned by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Convenience for tests and fakes.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body. An empty body decodes as JSON `null`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let bytes: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &self.body
        };
        serde_json::from_slice(bytes).map_err(ApiError::decode)
    }

    /// Decode a collection body, deciding its shape once.
    pub fn decode_list<T: DeserializeOwned>(&self) -> Result<ListBody<T>, ApiError> {
        self.decode()
    }
}
