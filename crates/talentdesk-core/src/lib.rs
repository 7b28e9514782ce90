//! Domain layer for TalentDesk.
//!
//! Holds the session context, the navigation guard, the reconciliation rules
//! for server-mirrored records, and the traits the outer layers implement
//! (HTTP transport, durable key-value storage, navigation, clock).

pub mod chat;
pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod learning;
pub mod navigation;
pub mod session;
pub mod storage;
pub mod wellness;

// Re-export common error type
pub use error::{DeskError, Result};
