//! Store service configuration.

use common::{ConfigError, DatabaseConfig};

/// Store service configuration.
#[derive(Debug, Clone, Default)]
pub struct StoreServiceConfig {
    /// Relational store holding users and products
    pub database: DatabaseConfig,
}

impl StoreServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database: DatabaseConfig::from_env()?,
        })
    }
}
