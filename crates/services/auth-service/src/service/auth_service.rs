//! Authentication service - registration, login and logout.
//!
//! Passwords are hashed and verified on the blocking thread pool. A login for
//! an unknown email still runs a full verification against a dummy hash, and
//! both failure causes surface as the same `InvalidCredentials` error.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::info;

use common::{AppError, AppResult};
use domain::{
    AuthState, Credentials, FormErrors, Identity, NewUser, Password, Registration, SessionId,
    User, EMAIL_TAKEN_MESSAGE,
};
use store_service_lib::repository::UserRepository;

use crate::session::SessionManager;

/// Hash verified when the email is unknown, so both paths cost the same.
static DUMMY_PASSWORD: Lazy<Password> = Lazy::new(|| {
    Password::new("dummy-password-never-matches").unwrap_or_else(|_| Password::from_hash(""))
});

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub id: SessionId,
    pub identity: Identity,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account. Does not log the user in.
    async fn register(&self, registration: Registration) -> AppResult<User>;

    /// Check credentials and start a new session, dropping `previous` if any
    async fn login(
        &self,
        credentials: Credentials,
        previous: Option<SessionId>,
    ) -> AppResult<AuthenticatedSession>;

    /// End a session. Never fails.
    async fn logout(&self, session: Option<SessionId>);

    /// Current authentication state for a session id
    async fn session(&self, id: Option<&SessionId>) -> AuthState;
}

/// Concrete implementation of AuthService over the credential store.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    sessions: SessionManager,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>, sessions: SessionManager) -> Self {
        Self { users, sessions }
    }

    async fn hash_password(plain: String) -> AppResult<Password> {
        let hashed = tokio::task::spawn_blocking(move || Password::new(&plain))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))?;
        Ok(hashed?)
    }

    async fn verify_password(stored: Password, plain: String) -> AppResult<bool> {
        tokio::task::spawn_blocking(move || stored.verify(&plain))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {}", e)))
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, registration: Registration) -> AppResult<User> {
        let old = registration.old_values();
        let password_hash = Self::hash_password(registration.password).await?.into_string();

        let new_user = NewUser {
            email: registration.email,
            password_hash,
            name: registration.name,
            surname: registration.surname,
            role: registration.role,
        };

        let user = self.users.create(new_user).await.map_err(|e| match e {
            AppError::Conflict(_) => {
                AppError::Form(FormErrors::field("user", EMAIL_TAKEN_MESSAGE).with_old(old))
            }
            other => other,
        })?;

        info!(email = %user.email, role = %user.role, "User registered");
        Ok(user)
    }

    async fn login(
        &self,
        credentials: Credentials,
        previous: Option<SessionId>,
    ) -> AppResult<AuthenticatedSession> {
        let user = self.users.find_by_email(&credentials.email).await?;

        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.as_str()),
            None => DUMMY_PASSWORD.clone(),
        };
        let password_valid = Self::verify_password(stored, credentials.password).await?;

        // Only succeed if both user exists AND password is valid
        let user = match user {
            Some(user) if password_valid => user,
            _ => {
                info!(email = %credentials.email, "Login rejected");
                return Err(AppError::InvalidCredentials);
            }
        };

        if let Some(previous) = previous {
            self.sessions.destroy(&previous).await;
        }

        let identity = Identity::from(&user);
        let id = self.sessions.start(identity.clone()).await?;

        info!(email = %user.email, role = %user.role, "User logged in");
        Ok(AuthenticatedSession { id, identity })
    }

    async fn logout(&self, session: Option<SessionId>) {
        if let Some(id) = session {
            self.sessions.destroy(&id).await;
        }
    }

    async fn session(&self, id: Option<&SessionId>) -> AuthState {
        self.sessions.read(id).await
    }
}
