//! Resource access layer.
//!
//! # Data Flow
//! ```text
//! feature repository (rounds, matches, ...)
//!     → client.rs ResourceClient<T> (fixed base path, typed records)
//!     → execute(verb, path, body, query)
//!     → http::Pipeline
//!     → typed result or ApiError
//! ```

pub mod client;

pub use client::{ResourceClient, ResourceId};
