//! Auth service configuration.

use std::str::FromStr;
use std::time::Duration;

use common::{env_parse, ConfigError, RedisConfig};
use domain::{DEFAULT_SESSION_TTL_SECONDS, MIN_SESSION_SECRET_LENGTH};

/// Where session records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Redis,
    Memory,
}

impl FromStr for SessionBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(SessionBackend::Redis),
            "memory" => Ok(SessionBackend::Memory),
            _ => Err(()),
        }
    }
}

/// Auth service configuration.
#[derive(Clone)]
pub struct AuthServiceConfig {
    /// Secret the session cookie signing key is derived from (min 32 characters)
    pub session_secret: String,
    /// Lifetime of an authenticated session
    pub session_ttl_seconds: u64,
    pub session_backend: SessionBackend,
    pub redis: RedisConfig,
}

// Keep the secret out of logs
impl std::fmt::Debug for AuthServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceConfig")
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("session_backend", &self.session_backend)
            .field("redis", &self.redis)
            .finish()
    }
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let session_secret =
            std::env::var("SESSION_SECRET").map_err(|_| ConfigError::Missing("SESSION_SECRET"))?;

        if session_secret.len() < MIN_SESSION_SECRET_LENGTH {
            return Err(ConfigError::TooShort {
                key: "SESSION_SECRET",
                min: MIN_SESSION_SECRET_LENGTH,
            });
        }

        let backend = std::env::var("SESSION_BACKEND").unwrap_or_else(|_| "redis".to_string());
        let session_backend = backend.parse().map_err(|_| ConfigError::Invalid {
            key: "SESSION_BACKEND",
            value: backend.clone(),
        })?;

        Ok(Self {
            session_secret,
            session_ttl_seconds: env_parse("SESSION_TTL_SECONDS", DEFAULT_SESSION_TTL_SECONDS)?,
            session_backend,
            redis: RedisConfig::from_env(),
        })
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_seconds)
    }

    /// Get session secret as bytes.
    pub fn session_secret_bytes(&self) -> &[u8] {
        self.session_secret.as_bytes()
    }
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            session_secret: String::new(),
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            session_backend: SessionBackend::Memory,
            redis: RedisConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parsing() {
        assert_eq!("redis".parse(), Ok(SessionBackend::Redis));
        assert_eq!("Memory".parse(), Ok(SessionBackend::Memory));
        assert!("postgres".parse::<SessionBackend>().is_err());
    }

    #[test]
    fn test_default_has_no_secret() {
        assert!(AuthServiceConfig::default().session_secret.is_empty());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthServiceConfig {
            session_secret: "a-very-long-cookie-signing-secret-value".to_string(),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("cookie-signing"));
    }

    // Both cases share one test so they never race on the same variable
    #[test]
    fn test_secret_is_required_and_checked() {
        std::env::remove_var("SESSION_SECRET");
        assert!(matches!(
            AuthServiceConfig::from_env(),
            Err(ConfigError::Missing("SESSION_SECRET"))
        ));

        std::env::set_var("SESSION_SECRET", "too-short");
        assert!(matches!(
            AuthServiceConfig::from_env(),
            Err(ConfigError::TooShort { .. })
        ));

        std::env::set_var("SESSION_SECRET", "0123456789abcdef0123456789abcdef");
        let config = AuthServiceConfig::from_env().unwrap();
        assert_eq!(config.session_secret_bytes().len(), 32);
        std::env::remove_var("SESSION_SECRET");
    }
}
