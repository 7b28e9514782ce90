//! Durable client storage trait.
//!
//! Defines the interface for the small string key-value store that survives
//! process restarts (credential, role marker, day-scoped tip cache).

use crate::error::Result;

/// Keys this core reads and writes in durable storage.
pub mod keys {
    /// Bearer credential.
    pub const TOKEN: &str = "token";
    /// Credential key written by older clients; read as a fallback and cleared.
    pub const LEGACY_TOKEN: &str = "jwt_token";
    /// Serialized identity written by older clients; only ever cleared.
    pub const USER: &str = "user";
    /// Cached role marker consulted by the navigation guard.
    pub const ROLE: &str = "role";
    /// Day-scoped wellness tip cache (JSON blob).
    pub const DAILY_WELLNESS_TIPS: &str = "daily_wellness_tips";

    /// Every key owned by the session lifecycle.
    pub const SESSION_KEYS: [&str; 4] = [TOKEN, LEGACY_TOKEN, USER, ROLE];
}

/// Synchronous string key-value storage.
///
/// Reads and writes are not transactional across keys; concurrent writers
/// from separate processes are not coordinated and the last write wins.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}
