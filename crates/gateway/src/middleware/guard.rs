//! Authorization gate.
//!
//! The checks are pure functions over a [`SessionContext`]. The middleware
//! wrappers are mounted as route layers, so a denied request never reaches
//! a handler or its extractors.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use domain::{Identity, UserRole};

use super::SessionContext;

/// Why a request was stopped at the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardRejection {
    /// No authenticated session: send the client to the login form
    LoginRequired,
    /// Authenticated with the wrong role
    Forbidden,
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        match self {
            GuardRejection::LoginRequired => Redirect::to("/login").into_response(),
            GuardRejection::Forbidden => (StatusCode::FORBIDDEN, "Prohibido").into_response(),
        }
    }
}

pub fn require_authenticated(ctx: &SessionContext) -> Result<&Identity, GuardRejection> {
    ctx.state.identity().ok_or(GuardRejection::LoginRequired)
}

pub fn require_role(ctx: &SessionContext, role: UserRole) -> Result<&Identity, GuardRejection> {
    let identity = require_authenticated(ctx)?;
    if identity.role == role {
        Ok(identity)
    } else {
        Err(GuardRejection::Forbidden)
    }
}

fn check(
    request: &Request,
    rule: impl FnOnce(&SessionContext) -> Result<(), GuardRejection>,
) -> Result<(), GuardRejection> {
    let ctx = request
        .extensions()
        .get::<SessionContext>()
        .ok_or(GuardRejection::LoginRequired)?;
    rule(ctx)
}

/// Any authenticated session.
pub async fn authenticated(request: Request, next: Next) -> Result<Response, GuardRejection> {
    check(&request, |ctx| require_authenticated(ctx).map(|_| ()))?;
    Ok(next.run(request).await)
}

pub async fn admin_only(request: Request, next: Next) -> Result<Response, GuardRejection> {
    check(&request, |ctx| require_role(ctx, UserRole::Admin).map(|_| ()))?;
    Ok(next.run(request).await)
}

pub async fn editor_only(request: Request, next: Next) -> Result<Response, GuardRejection> {
    check(&request, |ctx| require_role(ctx, UserRole::Editor).map(|_| ()))?;
    Ok(next.run(request).await)
}
