//! Auth Service Library
//!
//! Session-based authentication: registration, login and logout against the
//! credential store, plus the server-side session lifecycle.

pub mod config;
pub mod service;
pub mod session;

use std::sync::Arc;

use redis::RedisError;
use tracing::info;

use crate::config::{AuthServiceConfig, SessionBackend};
use crate::session::{MemorySessionStore, RedisSessionStore, SessionStore};

/// Build the configured session store.
pub async fn build_session_store(
    config: &AuthServiceConfig,
) -> Result<Arc<dyn SessionStore>, RedisError> {
    match config.session_backend {
        SessionBackend::Redis => {
            let store = RedisSessionStore::connect(&config.redis.url).await?;
            info!("Session store: redis");
            Ok(Arc::new(store))
        }
        SessionBackend::Memory => {
            info!("Session store: in-memory (sessions are lost on restart)");
            Ok(Arc::new(MemorySessionStore::new()))
        }
    }
}
