//! Navigation side effects.
//!
//! The client does not own any UI. When a 401 tears the session down, it asks
//! a [`Navigator`] to send the user to the login view.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Where the user currently is, and how to send them elsewhere.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn redirect(&self, path: &str);
}

/// In-memory navigator that tracks the current path and counts redirects.
#[derive(Debug)]
pub struct Location {
    path: Mutex<String>,
    redirects: AtomicUsize,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Mutex::new(path.into()),
            redirects: AtomicUsize::new(0),
        }
    }

    /// Move without counting as a redirect (user navigation).
    pub fn visit(&self, path: impl Into<String>) {
        if let Ok(mut current) = self.path.lock() {
            *current = path.into();
        }
    }

    /// Number of redirects issued so far.
    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for Location {
    fn current_path(&self) -> String {
        self.path.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn redirect(&self, path: &str) {
        tracing::info!(to = %path, "Redirecting");
        self.redirects.fetch_add(1, Ordering::SeqCst);
        self.visit(path);
    }
}
