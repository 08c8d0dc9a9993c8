//! Gateway configuration.

use common::{env_or, env_parse, ConfigError};

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Mark the session cookie `Secure` (serve over HTTPS)
    pub secure_cookies: bool,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: env_or("GATEWAY_HOST", &defaults.host),
            port: env_parse("GATEWAY_PORT", defaults.port)?,
            secure_cookies: env_parse("SESSION_COOKIE_SECURE", defaults.secure_cookies)?,
        })
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            secure_cookies: false,
        }
    }
}
