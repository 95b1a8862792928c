//! Database connection pool management
//!
//! This module provides connection pool configuration and creation for
//! PostgreSQL using SQLx.

use serde::Deserialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::error::DatabaseError;

/// Type alias for the PostgreSQL connection pool
pub type DatabasePool = PgPool;

/// Configuration options for the database connection pool
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use infra_db::DatabaseConfig;
///
/// let config = DatabaseConfig::new("postgres://localhost/registry")
///     .max_connections(20)
///     .min_connections(5)
///     .connect_timeout(Duration::from_secs(10));
/// assert_eq!(config.max_connections, 20);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// How long to wait when acquiring a connection
    pub connect_timeout: Duration,
    /// Maximum lifetime of a connection
    pub max_lifetime: Duration,
    /// Idle timeout before closing a connection
    pub idle_timeout: Duration,
}

/// Raw `DATABASE_*` environment settings
///
/// Durations are given in whole seconds.
#[derive(Debug, Deserialize)]
struct EnvSettings {
    url: String,
    max_connections: Option<u32>,
    min_connections: Option<u32>,
    connect_timeout_secs: Option<u64>,
    max_lifetime_secs: Option<u64>,
    idle_timeout_secs: Option<u64>,
}

impl DatabaseConfig {
    /// Creates a new database configuration with the given connection URL
    /// and default pool settings
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout: Duration::from_secs(30),
            max_lifetime: Duration::from_secs(30 * 60),
            idle_timeout: Duration::from_secs(10 * 60),
        }
    }

    /// Loads the configuration from `DATABASE_*` environment variables
    ///
    /// `DATABASE_URL` is required. `DATABASE_MAX_CONNECTIONS`,
    /// `DATABASE_MIN_CONNECTIONS`, `DATABASE_CONNECT_TIMEOUT_SECS`,
    /// `DATABASE_MAX_LIFETIME_SECS` and `DATABASE_IDLE_TIMEOUT_SECS`
    /// override the defaults.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Configuration` if the URL is missing or a
    /// value cannot be parsed.
    pub fn from_env() -> Result<Self, DatabaseError> {
        let settings: EnvSettings = config::Config::builder()
            .add_source(config::Environment::with_prefix("DATABASE").try_parsing(true))
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| DatabaseError::Configuration(e.to_string()))?;

        Ok(Self::from_settings(settings))
    }

    fn from_settings(settings: EnvSettings) -> Self {
        let mut config = Self::new(settings.url);
        if let Some(max) = settings.max_connections {
            config = config.max_connections(max);
        }
        if let Some(min) = settings.min_connections {
            config = config.min_connections(min);
        }
        if let Some(secs) = settings.connect_timeout_secs {
            config = config.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = settings.max_lifetime_secs {
            config = config.max_lifetime(Duration::from_secs(secs));
        }
        if let Some(secs) = settings.idle_timeout_secs {
            config = config.idle_timeout(Duration::from_secs(secs));
        }
        config
    }

    /// Sets the maximum number of connections in the pool (default: 10)
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections to maintain (default: 2)
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the acquire timeout (default: 30s)
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the maximum lifetime of a connection (default: 30 min)
    pub fn max_lifetime(mut self, lifetime: Duration) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    /// Sets the idle timeout before closing a connection (default: 10 min)
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }
}

/// Creates a database connection pool with the given configuration
///
/// # Errors
///
/// Returns `DatabaseError::ConnectionFailed` if the pool cannot be created
///
/// # Example
///
/// ```rust,ignore
/// use infra_db::{DatabaseConfig, create_pool};
///
/// let config = DatabaseConfig::new("postgres://localhost/registry");
/// let pool = create_pool(config).await?;
/// ```
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!(
        "Creating database pool with max_connections={}, min_connections={}",
        config.max_connections, config.min_connections
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout)
        .max_lifetime(config.max_lifetime)
        .idle_timeout(config.idle_timeout)
        .connect(&config.url)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Database pool created successfully");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = DatabaseConfig::new("postgres://test")
            .max_connections(50)
            .min_connections(10)
            .connect_timeout(Duration::from_secs(60));

        assert_eq!(config.max_connections, 50);
        assert_eq!(config.min_connections, 10);
        assert_eq!(config.connect_timeout, Duration::from_secs(60));
        assert_eq!(config.idle_timeout, Duration::from_secs(600));
    }

    #[test]
    fn test_settings_override_defaults() {
        let settings = EnvSettings {
            url: "postgres://localhost/registry".to_string(),
            max_connections: Some(4),
            min_connections: None,
            connect_timeout_secs: Some(5),
            max_lifetime_secs: None,
            idle_timeout_secs: Some(60),
        };
        let config = DatabaseConfig::from_settings(settings);

        assert_eq!(config.max_connections, 4);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.max_lifetime, Duration::from_secs(1800));
        assert_eq!(config.idle_timeout, Duration::from_secs(60));
    }
}
