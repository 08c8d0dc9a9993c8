//! Login, logout and registration handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::{cookie::Cookie, SignedCookieJar};

use common::AppError;
use domain::{LoginForm, RegisterForm, UserRole, LOGIN_FAILED_MESSAGE, SESSION_COOKIE_NAME};

use crate::extractors::ValidatedForm;
use crate::middleware::{session_cookie, SessionContext};
use crate::state::AppState;
use crate::views;

/// Shown after a successful registration
const REGISTERED_MESSAGE: &str = "¡El usuario ha sido registrado!";

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_form))
        .route("/auth", post(authenticate))
        .route("/logout", get(logout))
        .route("/registro", get(register_form))
        .route("/register", post(register))
}

pub async fn login_form() -> Html<String> {
    views::login(None, None)
}

/// Check credentials, start a session and redirect by role.
pub async fn authenticate(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    jar: SignedCookieJar,
    ValidatedForm(credentials): ValidatedForm<LoginForm>,
) -> Response {
    match state.auth.login(credentials, ctx.id).await {
        Ok(session) => {
            let target = match session.identity.role {
                UserRole::Admin => "/admin",
                UserRole::Editor => "/editor",
            };
            let jar = jar.add(session_cookie(session.id, &state.config));
            (jar, Redirect::to(target)).into_response()
        }
        Err(AppError::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            views::login(None, Some(LOGIN_FAILED_MESSAGE)),
        )
            .into_response(),
        Err(e) => (e.status(), views::login(None, Some(&e.user_message()))).into_response(),
    }
}

/// Destroy the session and drop the cookie. Never fails.
pub async fn logout(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Redirect) {
    state.auth.logout(ctx.id).await;
    let jar = jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"));
    (jar, Redirect::to("/login"))
}

pub async fn register_form() -> Html<String> {
    views::register(None, None)
}

/// Create an account. The new user is not logged in.
pub async fn register(
    State(state): State<AppState>,
    ValidatedForm(registration): ValidatedForm<RegisterForm>,
) -> Response {
    match state.auth.register(registration).await {
        Ok(_) => (StatusCode::OK, views::register(None, Some(REGISTERED_MESSAGE))).into_response(),
        Err(AppError::Form(errors)) => {
            (StatusCode::UNPROCESSABLE_ENTITY, views::register(Some(&errors), None)).into_response()
        }
        // user_message logs internal causes
        Err(e) => (e.status(), views::register(None, Some(&e.user_message()))).into_response(),
    }
}
