//! The owned session context.
//!
//! One `SessionContext` exists per client. It is injected into the request
//! pipeline (which writes to it on 401) and read by the navigation guard
//! through [`SessionView`].

use super::model::{Role, SessionSnapshot, UserIdentity};
use crate::error::{DeskError, Result};
use crate::storage::{KeyValueStore, keys};
use std::sync::{Arc, RwLock};

/// Narrow read interface over the session.
pub trait SessionView: Send + Sync {
    fn snapshot(&self) -> SessionSnapshot;

    fn credential(&self) -> Option<String> {
        self.snapshot().credential.filter(|token| !token.is_empty())
    }

    fn role(&self) -> Option<Role> {
        self.snapshot().role()
    }

    fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated()
    }
}

/// Session state with an explicit `create` / `clear` lifecycle.
///
/// Writers (login, logout, the 401 interceptor) are serialized by the lock
/// only for the duration of a single state swap; the lock is never held
/// across an await point.
pub struct SessionContext {
    state: RwLock<SessionSnapshot>,
    storage: Arc<dyn KeyValueStore>,
}

impl SessionContext {
    /// Creates an empty, unauthenticated context.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            state: RwLock::new(SessionSnapshot::default()),
            storage,
        }
    }

    /// Rebuilds the context from durable storage at process start.
    ///
    /// Reads `token`, falling back to the legacy `jwt_token` key, and the
    /// cached role marker. Identity is not persisted; callers fetch it again.
    pub fn restore(storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let credential = match storage.get(keys::TOKEN)? {
            Some(token) if !token.is_empty() => Some(token),
            _ => storage
                .get(keys::LEGACY_TOKEN)?
                .filter(|token| !token.is_empty()),
        };
        let role_marker = storage.get(keys::ROLE)?;

        if credential.is_some() {
            tracing::info!("Restored persisted session credential");
        }

        Ok(Self {
            state: RwLock::new(SessionSnapshot {
                credential,
                identity: None,
                role_marker,
            }),
            storage,
        })
    }

    /// Starts a session: persists the credential and role marker, then swaps
    /// the in-memory state.
    ///
    /// When persisting fails the in-memory state is left untouched.
    pub fn create(
        &self,
        credential: String,
        identity: Option<UserIdentity>,
        role: Option<String>,
    ) -> Result<()> {
        if credential.is_empty() {
            return Err(DeskError::internal("Refusing to start a session with an empty credential"));
        }

        let role_marker = identity
            .as_ref()
            .and_then(|user| user.role.clone())
            .or(role);

        self.storage.set(keys::TOKEN, &credential)?;
        match &role_marker {
            Some(role) => self.storage.set(keys::ROLE, role)?,
            None => self.storage.remove(keys::ROLE)?,
        }

        let mut state = self.write_state();
        *state = SessionSnapshot {
            credential: Some(credential),
            identity,
            role_marker,
        };
        tracing::info!("Session created");
        Ok(())
    }

    /// Replaces the identity of the current session.
    ///
    /// A role carried by the new identity also refreshes the cached marker.
    pub fn set_identity(&self, identity: UserIdentity) -> Result<()> {
        if let Some(role) = identity.role.as_deref() {
            self.storage.set(keys::ROLE, role)?;
        }
        let mut state = self.write_state();
        if let Some(role) = identity.role.clone() {
            state.role_marker = Some(role);
        }
        state.identity = Some(identity);
        Ok(())
    }

    /// Ends the session.
    ///
    /// The in-memory state is cleared first and unconditionally; every
    /// session key is then removed from durable storage. Calling this on an
    /// empty session is a no-op apart from the storage removals.
    pub fn clear(&self) -> Result<()> {
        {
            let mut state = self.write_state();
            *state = SessionSnapshot::default();
        }

        let mut first_error = None;
        for key in keys::SESSION_KEYS {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, error = %e, "Failed to remove session key from storage");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn identity(&self) -> Option<UserIdentity> {
        self.read_state().identity.clone()
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, SessionSnapshot> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, SessionSnapshot> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionView for SessionContext {
    fn snapshot(&self) -> SessionSnapshot {
        self.read_state().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore {
        values: Mutex<HashMap<String, String>>,
    }

    impl KeyValueStore for MapStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.values.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn identity(role: &str) -> UserIdentity {
        UserIdentity {
            user_id: Some(1),
            role: Some(role.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_persists_credential_and_role() {
        let storage = Arc::new(MapStore::default());
        let context = SessionContext::new(storage.clone());

        context.create("abc".into(), Some(identity("HR")), None).unwrap();

        assert!(context.is_authenticated());
        assert_eq!(context.role(), Some(Role::Hr));
        assert_eq!(storage.get(keys::TOKEN).unwrap().as_deref(), Some("abc"));
        assert_eq!(storage.get(keys::ROLE).unwrap().as_deref(), Some("HR"));
    }

    #[test]
    fn test_create_rejects_empty_credential() {
        let context = SessionContext::new(Arc::new(MapStore::default()));
        assert!(context.create(String::new(), None, None).is_err());
        assert!(!context.is_authenticated());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let storage = Arc::new(MapStore::default());
        storage.set(keys::USER, "{}").unwrap();
        storage.set(keys::LEGACY_TOKEN, "old").unwrap();
        let context = SessionContext::new(storage.clone());
        context.create("abc".into(), Some(identity("employee")), None).unwrap();

        context.clear().unwrap();
        context.clear().unwrap();

        assert!(!context.is_authenticated());
        assert!(context.identity().is_none());
        for key in keys::SESSION_KEYS {
            assert!(storage.get(key).unwrap().is_none(), "{key} should be removed");
        }
    }

    #[test]
    fn test_restore_round_trip() {
        let storage = Arc::new(MapStore::default());
        {
            let context = SessionContext::new(storage.clone());
            context.create("persisted".into(), None, Some("candidate".into())).unwrap();
        }

        let restored = SessionContext::restore(storage.clone()).unwrap();
        assert!(restored.is_authenticated());
        assert_eq!(restored.credential().as_deref(), Some("persisted"));
        assert_eq!(restored.role(), Some(Role::Candidate));

        restored.clear().unwrap();
        let again = SessionContext::restore(storage).unwrap();
        assert!(!again.is_authenticated());
    }

    #[test]
    fn test_restore_reads_legacy_key() {
        let storage = Arc::new(MapStore::default());
        storage.set(keys::LEGACY_TOKEN, "legacy").unwrap();
        let restored = SessionContext::restore(storage).unwrap();
        assert_eq!(restored.credential().as_deref(), Some("legacy"));
    }

    #[test]
    fn test_set_identity_refreshes_role_marker() {
        let storage = Arc::new(MapStore::default());
        let context = SessionContext::new(storage.clone());
        context.create("abc".into(), None, Some("candidate".into())).unwrap();

        context.set_identity(identity("employee")).unwrap();

        assert_eq!(context.role(), Some(Role::Employee));
        assert_eq!(storage.get(keys::ROLE).unwrap().as_deref(), Some("employee"));
    }
}
