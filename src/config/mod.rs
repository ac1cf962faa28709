//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + PELADA_API_URL
//!     → loader.rs (parse, deserialize, env override)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → root.rs resolves the API root once
//!     → ApiRoot injected into every resource client
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never revalidated
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod root;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_default, ConfigError};
pub use root::ApiRoot;
pub use schema::{ApiConfig, ClientConfig, LogFormat, ObservabilityConfig, SessionConfig, TimeoutConfig};
