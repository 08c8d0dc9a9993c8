//! Request-scoped session loading.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    SignedCookieJar,
};

use domain::{AuthState, SessionId, SESSION_COOKIE_NAME};

use crate::config::GatewayConfig;
use crate::state::AppState;

/// Session id carried by the request (if its cookie verified) and the state it maps to.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub id: Option<SessionId>,
    pub state: AuthState,
}

/// Resolve the signed session cookie into a [`SessionContext`] extension.
///
/// A missing, tampered or unknown cookie yields an anonymous context.
pub async fn load_session(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let id = jar
        .get(SESSION_COOKIE_NAME)
        .and_then(|cookie| SessionId::parse(cookie.value()));
    let auth = state.auth.session(id.as_ref()).await;

    request
        .extensions_mut()
        .insert(SessionContext { id, state: auth });

    next.run(request).await
}

/// Cookie carrying a session id. Signed when added to a [`SignedCookieJar`].
pub fn session_cookie(id: SessionId, config: &GatewayConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
        .build()
}
