//! Route configuration.

use axum::{middleware, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{auth_routes, health_routes, page_routes, product_routes, user_routes};
use crate::middleware::load_session;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
///
/// Role guards are route layers inside each group; the session is loaded by
/// the outer layer, so it is available to every guard and handler.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(page_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(product_routes())
        .layer(middleware::from_fn_with_state(state.clone(), load_session))
        .with_state(state)
}
