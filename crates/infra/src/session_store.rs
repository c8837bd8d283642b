//! Per-session state storage.
//!
//! Each session sits behind its own mutex, so sessions never contend with one
//! another and a session's selection has exactly one writer at a time.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use thiserror::Error;

use carconfig_core::SessionId;
use carconfig_engine::Session;

/// Shared handle to one session.
pub type SessionHandle = Arc<Mutex<Session>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionStoreError {
    #[error("session not found: {0}")]
    NotFound(SessionId),
    #[error("session already exists: {0}")]
    AlreadyExists(SessionId),
    #[error("session store lock poisoned")]
    Poisoned,
}

pub trait SessionStore: Send + Sync {
    fn insert(&self, session: Session) -> Result<SessionHandle, SessionStoreError>;
    fn get(&self, id: SessionId) -> Result<SessionHandle, SessionStoreError>;
    fn remove(&self, id: SessionId) -> Result<(), SessionStoreError>;
    fn ids(&self) -> Vec<SessionId>;
}

/// In-memory session store for a single process.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, session: Session) -> Result<SessionHandle, SessionStoreError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionStoreError::Poisoned)?;
        let id = session.id();
        if sessions.contains_key(&id) {
            return Err(SessionStoreError::AlreadyExists(id));
        }
        let handle = Arc::new(Mutex::new(session));
        sessions.insert(id, handle.clone());
        Ok(handle)
    }

    fn get(&self, id: SessionId) -> Result<SessionHandle, SessionStoreError> {
        let sessions = self.sessions.read().map_err(|_| SessionStoreError::Poisoned)?;
        sessions.get(&id).cloned().ok_or(SessionStoreError::NotFound(id))
    }

    fn remove(&self, id: SessionId) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionStoreError::Poisoned)?;
        sessions
            .remove(&id)
            .map(|_| ())
            .ok_or(SessionStoreError::NotFound(id))
    }

    fn ids(&self) -> Vec<SessionId> {
        match self.sessions.read() {
            Ok(sessions) => sessions.keys().copied().collect(),
            Err(_) => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_are_isolated() {
        let store = InMemorySessionStore::new();
        let a = Session::with_defaults(SessionId::new());
        let b = Session::with_defaults(SessionId::new());
        let (a_id, b_id) = (a.id(), b.id());
        store.insert(a).unwrap();
        store.insert(b).unwrap();

        let _ = store.get(a_id).unwrap().lock().unwrap().choose_category("EV").unwrap();

        let b = store.get(b_id).unwrap();
        assert_eq!(b.lock().unwrap().selection().category(), None);
        assert_eq!(store.ids().len(), 2);
    }

    #[test]
    fn duplicate_and_missing_ids_are_reported() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();
        store.insert(Session::with_defaults(id)).unwrap();
        assert_eq!(
            store.insert(Session::with_defaults(id)).err(),
            Some(SessionStoreError::AlreadyExists(id))
        );

        store.remove(id).unwrap();
        assert_eq!(store.get(id).err(), Some(SessionStoreError::NotFound(id)));
        assert_eq!(store.remove(id), Err(SessionStoreError::NotFound(id)));
    }
}
