//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! ResourceClient call
//!     → query.rs (present keys appended to the URL)
//!     → method.rs (verb strategy shapes the request)
//!     → request.rs (request ID, headers, body)
//!     → pipeline.rs (auth → transport.rs → inspect → normalize)
//!     → response.rs (decode JSON)
//!     → envelope.rs (bare array vs. paginated envelope)
//! ```

pub mod envelope;
pub mod method;
pub mod pipeline;
pub mod query;
pub mod request;
pub mod response;
pub mod transport;

pub use envelope::{ListBody, Page, PageMeta};
pub use method::Method;
pub use pipeline::Pipeline;
pub use query::{QueryParams, QueryValue};
pub use request::{ApiRequest, X_REQUEST_ID};
pub use response::ApiResponse;
pub use transport::{HttpTransport, Transport};
