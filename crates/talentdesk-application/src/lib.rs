//! Application layer for TalentDesk.
//!
//! Stores that coordinate the session, the request pipeline and the domain
//! reconciliation rules of `talentdesk-core`.

pub mod endpoints;
pub mod pipeline;
pub mod portal;
pub mod session_store;
pub mod status;
pub mod stores;

#[cfg(test)]
mod test_support;

pub use pipeline::RequestPipeline;
pub use portal::Portal;
pub use session_store::{AuthPayload, SessionStore};
pub use status::{LoadingFlag, StoreStatus};
