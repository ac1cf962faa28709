//! Sign-in, sign-out and current user.
//!
//! # Responsibilities
//! - Exchange email/password for a bearer token and persist it
//! - Support the legacy non-versioned sign-in endpoint
//! - Tear the session down on logout, whatever the server says
//!
//! # Design Decisions
//! - Logout notification is best-effort: failures are logged, never returned
//! - The method tag decides which sign-out endpoint is notified

use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::config::ApiRoot;
use crate::error::ApiError;
use crate::http::{ApiResponse, Method, Pipeline};
use crate::session::{AuthMethod, Credential};

const LOGIN_PATH: &str = "/auth/login";
const LOGOUT_PATH: &str = "/auth/logout";
const ME_PATH: &str = "/auth/me";
const LEGACY_SIGN_IN_PATH: &str = "/auth/sign_in";
const LEGACY_SIGN_OUT_PATH: &str = "/auth/sign_out";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(alias = "access_token")]
    token: String,
}

/// The signed-in user as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
}

/// Authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthService {
    root: ApiRoot,
    pipeline: Pipeline,
}

impl AuthService {
    pub fn new(root: ApiRoot, pipeline: Pipeline) -> Self {
        Self { root, pipeline }
    }

    /// Sign in through the versioned API.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        let url = self.url(self.root.versioned(LOGIN_PATH))?;
        self.sign_in(url, email, password, AuthMethod::Standard).await
    }

    /// Sign in through the legacy, non-versioned endpoint.
    pub async fn legacy_sign_in(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        let url = self.url(self.root.unversioned(LEGACY_SIGN_IN_PATH))?;
        self.sign_in(url, email, password, AuthMethod::Legacy).await
    }

    async fn sign_in(&self, url: Url, email: &str, password: &str, method: AuthMethod) -> Result<Credential, ApiError> {
        let body = json!({ "email": email, "password": password });
        let response = self.pipeline.send(Method::Post.prepare(url, Some(body))).await?;
        let token: TokenResponse = response.decode()?;

        let credential = Credential::new(token.token, method);
        self.pipeline.session().credentials().save(&credential)?;
        tracing::info!(method = ?method, "Signed in");
        Ok(credential)
    }

    pub async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        let url = self.url(self.root.versioned(ME_PATH))?;
        self.pipeline.send(Method::Get.prepare(url, None)).await?.decode()
    }

    /// Notify the server (best-effort) and destroy the local session.
    pub async fn logout(&self) {
        let credentials = self.pipeline.session().credentials();
        let current = match credentials.load() {
            Ok(current) => current,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read session before logout");
                None
            }
        };

        if let Some(credential) = current {
            if let Err(e) = self.notify_logout(credential.method).await {
                tracing::warn!(error = %e, "Logout notification failed; clearing local session anyway");
            }
        }

        if let Err(e) = credentials.clear() {
            tracing::error!(error = %e, "Failed to clear local session");
        } else {
            tracing::info!("Signed out");
        }
    }

    async fn notify_logout(&self, method: AuthMethod) -> Result<ApiResponse, ApiError> {
        let request = match method {
            AuthMethod::Standard => Method::Post.prepare(self.url(self.root.versioned(LOGOUT_PATH))?, None),
            AuthMethod::Legacy => Method::Delete.prepare(self.url(self.root.unversioned(LEGACY_SIGN_OUT_PATH))?, None),
        };
        self.pipeline.send(request).await
    }

    fn url(&self, raw: String) -> Result<Url, ApiError> {
        Url::parse(&raw).map_err(|e| ApiError::invalid_request(format!("invalid URL '{}': {}", raw, e)))
    }
}
