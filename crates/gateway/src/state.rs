//! Application state for dependency injection.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use auth_service_lib::service::AuthService;
use store_service_lib::service::{CatalogService, UserService};

use crate::config::GatewayConfig;
use crate::probes::HealthProbe;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UserService>,
    pub catalog: Arc<dyn CatalogService>,
    pub probes: Arc<[Arc<dyn HealthProbe>]>,
    /// Signs and verifies the session cookie
    pub cookie_key: Key,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        auth: Arc<dyn AuthService>,
        users: Arc<dyn UserService>,
        catalog: Arc<dyn CatalogService>,
        probes: Vec<Arc<dyn HealthProbe>>,
        cookie_key: Key,
        config: GatewayConfig,
    ) -> Self {
        Self {
            auth,
            users,
            catalog,
            probes: probes.into(),
            cookie_key,
            config,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
