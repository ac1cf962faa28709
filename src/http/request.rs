//! Outgoing request representation.
//!
//! # Responsibilities
//! - Carry method, absolute URL, headers and optional JSON body to the transport
//! - Generate a unique request ID (UUID v4) for correlation in logs
//!
//! # Design Decisions
//! - Request ID assigned when the request is built, before auth is attached
//! - Headers are plain `HeaderMap` so middleware can inspect them in tests

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use crate::http::method::Method;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// A request ready for the transport.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub id: Uuid,
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: Url, body: Option<Value>) -> Self {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
            headers.insert(X_REQUEST_ID, value);
        }
        Self {
            id,
            method,
            url,
            headers,
            body,
        }
    }

    /// Header value as text, if present and printable.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The raw `Authorization` header.
    pub fn authorization(&self) -> Option<&str> {
        self.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_header() {
        let url = Url::parse("http://localhost/api/v1/teams").unwrap();
        let req = ApiRequest::new(Method::Get, url, None);
        assert_eq!(req.header(X_REQUEST_ID), Some(req.id.to_string().as_str()));
        assert!(req.authorization().is_none());
    }

    #[test]
    fn test_request_ids_are_unique() {
        let url = Url::parse("http://localhost/").unwrap();
        let a = ApiRequest::new(Method::Get, url.clone(), None);
        let b = ApiRequest::new(Method::Get, url, None);
        assert_ne!(a.id, b.id);
    }
}
