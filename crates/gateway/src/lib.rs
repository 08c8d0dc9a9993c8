//! API Gateway Library
//!
//! The HTTP surface of the portal: session cookie handling, authorization
//! guards, server-rendered pages and the JSON endpoints.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod probes;
pub mod routes;
pub mod state;
pub mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use axum_extra::extract::cookie::Key;
use tower_http::trace::TraceLayer;
use tracing::info;

use auth_service_lib::{
    build_session_store, config::AuthServiceConfig, service::Authenticator,
    session::SessionManager,
};
use store_service_lib::{
    config::StoreServiceConfig,
    infra::Database,
    repository::{ProductStore, UserStore},
    service::{CatalogManager, UserManager},
};

use crate::config::GatewayConfig;
use crate::probes::{DatabaseProbe, HealthProbe, SessionStoreProbe};
use crate::routes::create_router;
use crate::state::AppState;

/// Run the whole portal in one process (for the combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GatewayConfig::from_env()?;
    config.host = host.to_string();
    config.port = port;

    run_server_with_config(
        config,
        AuthServiceConfig::from_env()?,
        StoreServiceConfig::from_env()?,
    )
    .await
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    config: GatewayConfig,
    auth_config: AuthServiceConfig,
    store_config: StoreServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect(&store_config.database).await?;
    let user_repo = Arc::new(UserStore::new(db.get_connection()));
    let product_repo = Arc::new(ProductStore::new(db.get_connection()));

    // Session store and services
    let session_store = build_session_store(&auth_config).await?;
    let sessions = SessionManager::new(session_store.clone(), auth_config.session_ttl());

    let probes: Vec<Arc<dyn HealthProbe>> = vec![
        Arc::new(DatabaseProbe(db)),
        Arc::new(SessionStoreProbe(session_store)),
    ];

    let state = AppState::new(
        Arc::new(Authenticator::new(user_repo.clone(), sessions)),
        Arc::new(UserManager::new(user_repo)),
        Arc::new(CatalogManager::new(product_repo)),
        probes,
        Key::derive_from(auth_config.session_secret_bytes()),
        config.clone(),
    );

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Portal listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
