//! Redis-backed session store.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisError};
use tracing::{debug, warn};

use common::{AppError, AppResult};
use domain::{AuthState, SessionId};

use super::SessionStore;

/// Key prefix for session records
const SESSION_KEY_PREFIX: &str = "session:";

/// Sessions stored as JSON values with a Redis-side TTL.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    /// Connect to Redis.
    pub async fn connect(url: &str) -> Result<Self, RedisError> {
        debug!("Connecting to Redis at {}", url);
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    fn key(id: &SessionId) -> String {
        format!("{}{}", SESSION_KEY_PREFIX, id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: &SessionId) -> AppResult<Option<AuthState>> {
        let mut conn = self.conn.clone();
        let key = Self::key(id);
        let result: Option<String> = conn.get(&key).await?;

        match result {
            Some(json) => match serde_json::from_str(&json) {
                Ok(state) => Ok(Some(state)),
                Err(e) => {
                    warn!("Corrupt session record {}: {}", key, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn save(&self, id: &SessionId, state: &AuthState, ttl: Duration) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(state)
            .map_err(|e| AppError::internal(format!("Session serialization error: {}", e)))?;
        // SET EX rejects a zero expiry
        let ttl_seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(Self::key(id), json, ttl_seconds).await?;
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(Self::key(id)).await?;
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
