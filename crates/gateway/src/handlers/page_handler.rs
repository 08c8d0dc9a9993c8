//! Landing pages.

use axum::{
    extract::Extension,
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::middleware::{admin_only, editor_only, require_authenticated, SessionContext};
use crate::state::AppState;
use crate::views;

/// Create page routes: the public home and one landing page per role.
pub fn page_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/admin", get(role_home))
        .route_layer(middleware::from_fn(admin_only));
    let editor = Router::new()
        .route("/editor", get(role_home))
        .route_layer(middleware::from_fn(editor_only));

    Router::new()
        .route("/", get(home))
        .merge(admin)
        .merge(editor)
}

pub async fn home(Extension(ctx): Extension<SessionContext>) -> Html<String> {
    views::home(&ctx.state)
}

/// Landing page for the caller's role. Mounted behind a role guard.
pub async fn role_home(Extension(ctx): Extension<SessionContext>) -> Response {
    match require_authenticated(&ctx) {
        Ok(identity) => views::dashboard(identity).into_response(),
        Err(rejection) => rejection.into_response(),
    }
}
