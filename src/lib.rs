//! Typed client for the pelada championship API.
//!
//! # Architecture Overview
//!
//! ```text
//!   feature code
//!       │  api.rounds().get_all(..) / api.auth().login(..)
//!       ▼
//!   ┌──────────────┐     ┌──────────────┐     ┌──────────────────────────┐
//!   │   api        │────▶│  resource    │────▶│  http::Pipeline           │
//!   │  ApiClient   │     │ ResourceClient│    │  authorize → send →       │
//!   │  AuthService │     │  <T>          │    │  inspect → normalize      │
//!   └──────────────┘     └──────────────┘     └────────────┬─────────────┘
//!                                                          │
//!        ┌────────────────────┐                 ┌──────────▼─────────┐
//!        │ session            │◀── 401 ─────────│ http::Transport     │
//!        │ credential slot,   │                 │ (reqwest)           │
//!        │ navigator redirect │                 └────────────────────┘
//!        └────────────────────┘
//! ```
//!
//! Cross-cutting: `config` (TOML + env, API root resolved once),
//! `observability` (tracing subscriber, metrics facade), `error`
//! (one normalized [`ApiError`]).

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod observability;
pub mod resource;
pub mod session;

pub use api::{ApiClient, AuthService};
pub use config::{ApiRoot, ClientConfig};
pub use error::{ApiError, SetupError, UnknownMethod};
pub use http::{Method, Page, PageMeta, QueryParams};
pub use resource::{ResourceClient, ResourceId};
pub use session::{AuthMethod, Credential, FileStore, Location, MemoryStore};
