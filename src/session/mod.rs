//! Session subsystem.
//!
//! # Data Flow
//! ```text
//! login succeeds
//!     → credential.rs (Credential saved into the single slot)
//!     → store.rs (FileStore / MemoryStore persists it)
//!
//! every request
//!     → guard.rs authorize (slot read, bearer header attached)
//!
//! every response
//!     → guard.rs inspect (401 ⇒ slot cleared, navigator.rs redirect)
//! ```
//!
//! # Design Decisions
//! - At most one credential per process; no concurrent sessions
//! - The slot is read from the store each time, never cached in memory

pub mod credential;
pub mod guard;
pub mod navigator;
pub mod store;

pub use credential::{AuthMethod, Credential, CredentialStore, SESSION_KEY};
pub use guard::SessionGuard;
pub use navigator::{Location, Navigator};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
