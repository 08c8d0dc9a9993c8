//! Session lifecycle: start on login, read per request, destroy on logout.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use common::AppResult;
use domain::{AuthState, Identity, SessionId};

use super::SessionStore;

/// Creates, reads and destroys server-side sessions.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Persist an authenticated state under a fresh id. One store write.
    pub async fn start(&self, identity: Identity) -> AppResult<SessionId> {
        let id = SessionId::generate();
        let state = AuthState::from(identity);
        self.store.save(&id, &state, self.ttl).await?;
        Ok(id)
    }

    /// Current state for an optional id. Never fails; any problem reads as anonymous.
    pub async fn read(&self, id: Option<&SessionId>) -> AuthState {
        let Some(id) = id else {
            return AuthState::Anonymous;
        };

        match self.store.load(id).await {
            Ok(Some(state)) => state,
            Ok(None) => AuthState::Anonymous,
            Err(e) => {
                warn!("Session read failed, treating as anonymous: {}", e);
                AuthState::Anonymous
            }
        }
    }

    /// Drop a session. If the record cannot be deleted it is overwritten
    /// with the anonymous state instead. Errors are logged, never returned.
    pub async fn destroy(&self, id: &SessionId) {
        let Err(e) = self.store.delete(id).await else {
            info!("Session destroyed");
            return;
        };

        warn!("Session delete failed, overwriting with anonymous state: {}", e);
        if let Err(e) = self.store.save(id, &AuthState::Anonymous, self.ttl).await {
            error!("Session could not be cleared: {}", e);
        }
    }

    /// Check the backing store
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
