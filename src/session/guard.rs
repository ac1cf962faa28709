//! Per-request session handling.
//!
//! # Responsibilities
//! - Attach `Authorization: Bearer <token>` when a credential is stored
//! - On 401, destroy the credential and redirect to the login view
//!
//! # Design Decisions
//! - The credential is read on every request, so a rotated token is picked
//!   up by the very next call
//! - Fail safe to unauthenticated: no retry, no refresh
//! - The redirect is skipped when the user is already on the login view

use reqwest::header::{HeaderValue, AUTHORIZATION};
use std::sync::Arc;

use crate::error::ApiError;
use crate::http::request::ApiRequest;
use crate::http::response::ApiResponse;
use crate::observability::metrics;
use crate::session::credential::CredentialStore;
use crate::session::navigator::Navigator;

/// Auth injection and 401 teardown around every call.
#[derive(Clone)]
pub struct SessionGuard {
    credentials: CredentialStore,
    navigator: Arc<dyn Navigator>,
    login_path: String,
}

impl SessionGuard {
    pub fn new(credentials: CredentialStore, navigator: Arc<dyn Navigator>, login_path: impl Into<String>) -> Self {
        Self {
            credentials,
            navigator,
            login_path: login_path.into(),
        }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Attach the bearer header if a session exists.
    pub fn authorize(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        request.headers.remove(AUTHORIZATION);

        let credential = match self.credentials.load() {
            Ok(credential) => credential,
            Err(e) => {
                tracing::warn!(request_id = %request.id, error = %e, "Session store unreadable; sending unauthenticated");
                None
            }
        };

        if let Some(credential) = credential {
            let mut value = HeaderValue::from_str(&credential.bearer())
                .map_err(|_| ApiError::invalid_request("Stored session token is not a valid header value"))?;
            value.set_sensitive(true);
            request.headers.insert(AUTHORIZATION, value);
        }
        Ok(())
    }

    /// Inspect a response. Returns `true` when the session was torn down.
    pub fn inspect(&self, response: &ApiResponse) -> bool {
        if response.status != 401 {
            return false;
        }

        if let Err(e) = self.credentials.clear() {
            tracing::error!(error = %e, "Failed to clear session after 401");
        }
        metrics::record_session_invalidated();

        let current = self.navigator.current_path();
        if strip_query(&current) == self.login_path {
            tracing::debug!("401 received on the login view; not redirecting");
        } else {
            tracing::warn!(from = %current, to = %self.login_path, "Session rejected by server; redirecting to login");
            self.navigator.redirect(&self.login_path);
        }
        true
    }
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}
