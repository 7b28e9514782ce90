//! HTTP transport trait.

use super::model::{ApiRequest, ApiResponse};
use crate::error::Result;

/// Sends a fully prepared request to the backend.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status; status interpretation belongs to the pipeline.
/// `Err` is reserved for failures with no server response
/// (`DeskError::Transport` or `DeskError::Timeout`).
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}
