// Session context: the single owner of "who is logged in"
//
// Cloned into the auth manager and the gateway. Storage is read once when the
// context is restored; afterwards memory is authoritative and every
// transition is written through to storage.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::StorageError;
use crate::session::{Identity, Session, SessionState};
use crate::session_store::SessionStore;
use crate::storage::MemoryStorage;

enum Slot {
    Loading,
    Ready(Session),
}

struct Inner {
    store: SessionStore,
    slot: RwLock<Slot>,
}

/// Shared, injectable session handle
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<Inner>,
}

impl SessionContext {
    /// Build a context and restore the persisted session before returning,
    /// so no caller ever observes the loading state.
    pub fn restore(store: SessionStore) -> Self {
        let context = Self {
            inner: Arc::new(Inner {
                store,
                slot: RwLock::new(Slot::Loading),
            }),
        };

        let session = context.inner.store.load();
        tracing::debug!(state = %session.state(), "restored session from storage");
        *context.inner.slot.write() = Slot::Ready(session);
        context
    }

    /// Context over throwaway in-memory storage
    pub fn ephemeral() -> Self {
        Self::restore(SessionStore::new(Arc::new(MemoryStorage::new())))
    }

    pub fn state(&self) -> SessionState {
        match &*self.inner.slot.read() {
            Slot::Loading => SessionState::Loading,
            Slot::Ready(session) => session.state(),
        }
    }

    pub fn session(&self) -> Session {
        match &*self.inner.slot.read() {
            Slot::Loading => Session::Anonymous,
            Slot::Ready(session) => session.clone(),
        }
    }

    pub fn identity(&self) -> Option<Identity> {
        self.session().identity().cloned()
    }

    pub fn token(&self) -> Option<String> {
        self.session().token().map(str::to_string)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    pub fn store(&self) -> &SessionStore {
        &self.inner.store
    }

    /// Token to attach to outgoing requests, read from storage on every call.
    pub fn bearer_token(&self) -> Option<String> {
        self.inner.store.token()
    }

    /// Persist a freshly decoded session, then publish it. On a storage
    /// failure the in-memory state is left as it was and whatever part of
    /// the session reached storage is removed again.
    pub fn establish(&self, identity: Identity, token: String) -> Result<(), StorageError> {
        let session = Session::authenticated(identity, token);
        if let Err(e) = self.inner.store.save(&session) {
            tracing::warn!(error = %e, "failed to persist session, discarding partial write");
            if let Err(clear_err) = self.inner.store.clear() {
                tracing::warn!(error = %clear_err, "failed to clear partially stored session");
            }
            return Err(e);
        }
        *self.inner.slot.write() = Slot::Ready(session);
        Ok(())
    }

    /// Drop the session from storage and memory. Always ends anonymous.
    pub fn invalidate(&self) {
        if let Err(e) = self.inner.store.clear() {
            tracing::warn!(error = %e, "failed to clear stored session");
        }
        *self.inner.slot.write() = Slot::Ready(Session::Anonymous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;
    use crate::session_store::USER_KEY;
    use crate::storage::{DurableStorage, MemoryStorage};

    /// Memory storage that refuses to write the user record
    #[derive(Default)]
    struct UserWriteFails {
        inner: MemoryStorage,
    }

    impl DurableStorage for UserWriteFails {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == USER_KEY {
                return Err(StorageError::io(
                    "session.json",
                    std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                ));
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn test_restore_empty_storage_is_anonymous() {
        let context = SessionContext::ephemeral();
        assert_eq!(context.state(), SessionState::Anonymous);
        assert!(context.identity().is_none());
    }

    #[test]
    fn test_restore_recovers_persisted_session() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        store
            .save(&Session::authenticated(
                Identity::new("a@b.com", Role::Student),
                "h.p.s",
            ))
            .unwrap();

        let context = SessionContext::restore(SessionStore::new(storage));
        assert_eq!(context.state(), SessionState::Authenticated);
        assert_eq!(context.token().as_deref(), Some("h.p.s"));
    }

    #[test]
    fn test_establish_then_invalidate() {
        let storage = Arc::new(MemoryStorage::new());
        let context = SessionContext::restore(SessionStore::new(storage.clone()));

        context
            .establish(Identity::new("a@b.com", Role::Admin), "h.p.s".to_string())
            .unwrap();
        assert!(context.is_authenticated());
        assert_eq!(context.bearer_token().as_deref(), Some("h.p.s"));

        context.invalidate();
        context.invalidate();
        assert_eq!(context.state(), SessionState::Anonymous);
        assert!(storage.is_empty());
        assert!(storage.get_item("token").unwrap().is_none());
    }

    #[test]
    fn test_failed_establish_leaves_no_token_behind() {
        let storage = Arc::new(UserWriteFails::default());
        let context = SessionContext::restore(SessionStore::new(storage.clone()));

        let result =
            context.establish(Identity::new("a@b.com", Role::Admin), "h.p.s".to_string());

        assert!(result.is_err());
        assert_eq!(context.state(), SessionState::Anonymous);
        assert!(context.bearer_token().is_none());
        assert!(storage.inner.is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let context = SessionContext::ephemeral();
        let other = context.clone();
        context
            .establish(Identity::new("f@uni.edu", Role::Faculty), "h.p.s".to_string())
            .unwrap();
        assert_eq!(other.identity().unwrap().role, Role::Faculty);
    }
}
