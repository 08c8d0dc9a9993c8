//! Dependency health probes reported by `/health`.

use std::sync::Arc;

use async_trait::async_trait;

use auth_service_lib::session::SessionStore;
use store_service_lib::infra::Database;

/// A dependency the gateway can check.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(&self) -> Result<(), String>;
}

/// Relational store probe (`SELECT 1`).
pub struct DatabaseProbe(pub Database);

#[async_trait]
impl HealthProbe for DatabaseProbe {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> Result<(), String> {
        self.0.ping().await.map_err(|e| e.to_string())
    }
}

/// Session store probe.
pub struct SessionStoreProbe(pub Arc<dyn SessionStore>);

#[async_trait]
impl HealthProbe for SessionStoreProbe {
    fn name(&self) -> &'static str {
        "sessions"
    }

    async fn check(&self) -> Result<(), String> {
        self.0.ping().await.map_err(|e| e.to_string())
    }
}
