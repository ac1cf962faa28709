//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every resource call produces:
//!     → logging.rs (structured log events with request_id)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stderr (fmt subscriber)
//!     → whatever metrics recorder the host application installs
//! ```

pub mod logging;
pub mod metrics;
