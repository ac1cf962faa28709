//! API root resolution.
//!
//! The root is resolved once from [`ApiConfig`] and handed to every resource
//! client. An empty root means "same origin": requests go to the configured
//! origin, exactly like relative URLs in a page served by the API host.

use url::Url;

use crate::config::schema::ApiConfig;
use crate::error::SetupError;

/// Resolved API location, shared read-only by all clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoot {
    /// Explicit root, or empty for same-origin.
    root: String,
    /// Absolute base every URL is built on, without trailing slash.
    base: String,
    version_prefix: String,
}

impl ApiRoot {
    /// Resolve the root from configuration.
    pub fn resolve(config: &ApiConfig) -> Result<Self, SetupError> {
        let origin = parse(&config.origin)?;
        let version_prefix = config.version_prefix.trim_end_matches('/').to_string();

        let explicit = match config.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            Some(raw) => parse(raw)?,
            None => return Ok(Self::same_origin(&origin, version_prefix)),
        };

        if is_bare_origin(&explicit, &origin) {
            tracing::debug!(url = %explicit, "API root is the bare origin host; using same-origin requests");
            return Ok(Self::same_origin(&origin, version_prefix));
        }

        let root = trim_url(&explicit);
        Ok(Self {
            base: root.clone(),
            root,
            version_prefix,
        })
    }

    fn same_origin(origin: &Url, version_prefix: String) -> Self {
        Self {
            root: String::new(),
            base: trim_url(origin),
            version_prefix,
        }
    }

    /// The configured root, empty when requests are same-origin.
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn is_same_origin(&self) -> bool {
        self.root.is_empty()
    }

    /// `<base><version_prefix><base_path>`, e.g. `http://host/api/v1/rounds`.
    pub fn versioned(&self, base_path: &str) -> String {
        format!("{}{}{}", self.base, self.version_prefix, normalize_path(base_path))
    }

    /// `<base><path>`, for the few endpoints outside the versioned prefix.
    pub fn unversioned(&self, path: &str) -> String {
        format!("{}{}", self.base, normalize_path(path))
    }
}

fn parse(raw: &str) -> Result<Url, SetupError> {
    let url = Url::parse(raw.trim()).map_err(|e| SetupError::Root(format!("'{}': {}", raw, e)))?;
    // Paths are appended to the root, so it cannot end in a query or fragment.
    if url.query().is_some() || url.fragment().is_some() {
        return Err(SetupError::Root(format!("'{}': query strings and fragments are not allowed", raw)));
    }
    Ok(url)
}

/// Same scheme and host as the origin, no distinguishing port, no path.
fn is_bare_origin(explicit: &Url, origin: &Url) -> bool {
    let same_host = explicit.scheme() == origin.scheme() && explicit.host_str() == origin.host_str();
    let no_distinct_port = match explicit.port() {
        None => true,
        Some(port) => Some(port) == origin.port_or_known_default(),
    };
    let no_path = explicit.path() == "/" || explicit.path().is_empty();

    same_host && no_distinct_port && no_path && explicit.query().is_none()
}

fn trim_url(url: &Url) -> String {
    url.as_str().trim_end_matches('/').to_string()
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
