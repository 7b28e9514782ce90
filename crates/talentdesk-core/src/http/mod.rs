//! Request/response contract between the pipeline and the transport.
//!
//! # Module Structure
//!
//! - `model`: transport-neutral request and response values
//! - `transport`: the `HttpTransport` trait implemented by the infrastructure layer

mod model;
mod transport;

// Re-export public API
pub use model::{ApiRequest, ApiResponse, FilePart, HttpMethod, RequestBody};
pub use transport::HttpTransport;
