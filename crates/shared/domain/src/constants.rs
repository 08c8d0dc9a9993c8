//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Administrator role, allowed to manage the catalog
pub const ROLE_ADMIN: &str = "admin";

/// Editor role, read access to the catalog
pub const ROLE_EDITOR: &str = "editor";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// Sessions
// =============================================================================

/// Display name shown for sessions that are not authenticated
pub const ANONYMOUS_DISPLAY_NAME: &str = "Invitado";

/// Name of the cookie carrying the signed session id
pub const SESSION_COOKIE_NAME: &str = "portal.sid";

/// Minimum session signing secret length (security requirement)
pub const MIN_SESSION_SECRET_LENGTH: usize = 32;

/// Default lifetime of an authenticated session in seconds (2 hours)
pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 7200;

// =============================================================================
// User-facing messages
// =============================================================================

/// The only message shown for a failed login, whatever the cause
pub const LOGIN_FAILED_MESSAGE: &str = "Correo o contraseña incorrectos";

/// Shown when a registration collides with an existing email
pub const EMAIL_TAKEN_MESSAGE: &str = "Ese email ya está registrado";

/// Shown when the store or the hasher fails during a form submission
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno, intenta más tarde";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_admin_and_editor_are_valid_roles() {
        assert!(is_valid_role("admin"));
        assert!(is_valid_role("editor"));
        assert!(!is_valid_role("user"));
        assert!(!is_valid_role("Admin"));
        assert!(!is_valid_role(""));
    }
}
