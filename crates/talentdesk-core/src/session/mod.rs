//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: roles, user identity and session snapshots
//! - `context`: the owned session context and its read interface
//!
//! # Usage
//!
//! ```ignore
//! use talentdesk_core::session::{SessionContext, SessionView, Role};
//! ```

mod context;
mod model;

// Re-export public API
pub use context::{SessionContext, SessionView};
pub use model::{Role, SessionSnapshot, UserIdentity};
