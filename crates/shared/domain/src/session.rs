//! Session authentication state.
//!
//! [`AuthState`] is a sum type so that a role or display name can only exist
//! alongside an authenticated flag. It is always written to the session store
//! as one value.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::ANONYMOUS_DISPLAY_NAME;
use crate::user::{User, UserRole};

/// Opaque, randomly generated session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id carried by a client. Anything malformed is treated as absent.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Who an authenticated session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub display_name: String,
    pub role: UserRole,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            display_name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Authentication state of one client session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    /// The user's name, or the guest placeholder.
    pub fn display_name(&self) -> &str {
        match self {
            AuthState::Authenticated(identity) => &identity.display_name,
            AuthState::Anonymous => ANONYMOUS_DISPLAY_NAME,
        }
    }

    pub fn role(&self) -> Option<UserRole> {
        self.identity().map(|identity| identity.role)
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthState::Authenticated(identity) => Some(identity),
            AuthState::Anonymous => None,
        }
    }
}

impl From<Identity> for AuthState {
    fn from(identity: Identity) -> Self {
        AuthState::Authenticated(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_state_has_no_identity() {
        let state = AuthState::default();
        assert!(!state.is_authenticated());
        assert_eq!(state.role(), None);
        assert_eq!(state.display_name(), ANONYMOUS_DISPLAY_NAME);
    }

    #[test]
    fn test_authenticated_state_exposes_identity() {
        let state = AuthState::from(Identity {
            display_name: "Ana".to_string(),
            role: UserRole::Editor,
        });
        assert!(state.is_authenticated());
        assert_eq!(state.role(), Some(UserRole::Editor));
        assert_eq!(state.display_name(), "Ana");
    }

    #[test]
    fn test_state_serializes_as_single_tagged_value() {
        let state = AuthState::from(Identity {
            display_name: "Ana".to_string(),
            role: UserRole::Admin,
        });
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(
            json,
            r#"{"state":"authenticated","display_name":"Ana","role":"admin"}"#
        );

        let back: AuthState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_partial_state_does_not_deserialize() {
        let partial = r#"{"state":"authenticated","display_name":"Ana"}"#;
        assert!(serde_json::from_str::<AuthState>(partial).is_err());
    }

    #[test]
    fn test_session_id_parse_rejects_garbage() {
        assert!(SessionId::parse("not-a-uuid").is_none());
        let id = SessionId::generate();
        assert_eq!(SessionId::parse(&id.to_string()), Some(id));
    }
}
