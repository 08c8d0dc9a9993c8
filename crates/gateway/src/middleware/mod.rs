//! Middleware for session loading and route authorization.

mod guard;
mod session;

pub use guard::{
    admin_only, authenticated, editor_only, require_authenticated, require_role, GuardRejection,
};
pub use session::{load_session, session_cookie, SessionContext};
