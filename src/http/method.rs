//! HTTP verb strategies.
//!
//! Each verb decides the call shape handed to the transport: whether a body
//! travels with the request. Query parameters are attached to the URL for
//! every verb before the strategy runs.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::UnknownMethod;
use crate::http::request::ApiRequest;

/// The four verbs the resource layer speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub const ALL: [Method; 4] = [Method::Get, Method::Post, Method::Put, Method::Delete];

    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// GET and DELETE never carry a body; POST and PUT always send what they are given.
    pub const fn sends_body(self) -> bool {
        matches!(self, Method::Post | Method::Put)
    }

    /// Build the transport request for this verb.
    pub fn prepare(self, url: Url, body: Option<Value>) -> ApiRequest {
        let body = if self.sends_body() {
            body
        } else {
            if body.is_some() {
                tracing::trace!(method = self.as_str(), "Ignoring body for bodiless method");
            }
            None
        };
        ApiRequest::new(self, url, body)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}
