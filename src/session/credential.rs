//! Session credential and its single persisted slot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::session::store::{KeyValueStore, StoreError};

/// Key of the session slot in the backing store.
pub const SESSION_KEY: &str = "pelada.session";

/// Which sign-in flow issued the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// `/api/v1/auth/login`.
    Standard,
    /// Non-versioned `/auth/sign_in`.
    Legacy,
}

/// Bearer token plus the method that issued it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub method: AuthMethod,
}

impl Credential {
    pub fn new(token: impl Into<String>, method: AuthMethod) -> Self {
        Self {
            token: token.into(),
            method,
        }
    }

    /// `Bearer <token>`.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// Keep tokens out of logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("method", &self.method)
            .finish()
    }
}

/// The one process-wide credential slot.
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the slot. A corrupt slot reads as "no session".
    pub fn load(&self) -> Result<Option<Credential>, StoreError> {
        let Some(raw) = self.store.get(SESSION_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(credential) => Ok(Some(credential)),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session slot");
                Ok(None)
            }
        }
    }

    /// Replace whatever credential was stored.
    pub fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        let raw = serde_json::to_string(credential)?;
        self.store.set(SESSION_KEY, &raw)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(SESSION_KEY)
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore").field("key", &SESSION_KEY).finish()
    }
}
