//! In-process session store for development and tests.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::AppResult;
use domain::{AuthState, SessionId};

use super::SessionStore;

struct Entry {
    state: AuthState,
    expires_at: Instant,
}

/// Session records in a map guarded by an async lock. Lost on restart.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<SessionId, Entry>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) records.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: &SessionId) -> AppResult<Option<AuthState>> {
        let entries = self.entries.read().await;
        let state = entries
            .get(id)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.state.clone());
        Ok(state)
    }

    async fn save(&self, id: &SessionId, state: &AuthState, ttl: Duration) -> AppResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            *id,
            Entry {
                state: state.clone(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> AppResult<()> {
        self.entries.write().await.remove(id);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Identity, UserRole};

    fn editor() -> AuthState {
        AuthState::from(Identity {
            display_name: "Ana".to_string(),
            role: UserRole::Editor,
        })
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemorySessionStore::new();
        let id = SessionId::generate();

        store.save(&id, &editor(), Duration::from_secs(60)).await.unwrap();

        assert_eq!(store.load(&id).await.unwrap(), Some(editor()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_expired_record_is_absent() {
        let store = MemorySessionStore::new();
        let id = SessionId::generate();

        store.save(&id, &editor(), Duration::ZERO).await.unwrap();

        assert_eq!(store.load(&id).await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = MemorySessionStore::new();
        let id = SessionId::generate();
        store.save(&id, &editor(), Duration::from_secs(60)).await.unwrap();

        store.delete(&id).await.unwrap();

        assert_eq!(store.load(&id).await.unwrap(), None);
    }
}
