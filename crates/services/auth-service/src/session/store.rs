//! Session store abstraction.

use std::time::Duration;

use async_trait::async_trait;

use common::AppResult;
use domain::{AuthState, SessionId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Keyed storage for session state with store-side expiry.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a session. Missing, expired and unreadable records are `None`.
    async fn load(&self, id: &SessionId) -> AppResult<Option<AuthState>>;

    /// Write the complete state in one operation, replacing any previous value
    async fn save(&self, id: &SessionId, state: &AuthState, ttl: Duration) -> AppResult<()>;

    async fn delete(&self, id: &SessionId) -> AppResult<()>;

    /// Check store connectivity
    async fn ping(&self) -> AppResult<()>;
}
