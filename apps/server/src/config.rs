//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Username of the bootstrap admin account
    pub admin_username: String,

    /// Password of the bootstrap admin account
    ///
    /// Only used on first startup; once the user row exists the stored
    /// hash wins and this value is ignored.
    pub admin_password: String,

    /// Session lifetime in seconds
    pub session_lifetime_secs: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "dukaan.db".to_string()),

            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),

            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),

            session_lifetime_secs: env::var("SESSION_LIFETIME_SECS")
                .unwrap_or_else(|_| "43200".to_string()) // 12 hours
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SESSION_LIFETIME_SECS".to_string()))?,
        };

        if config.session_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue(
                "SESSION_LIFETIME_SECS".to_string(),
            ));
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    /// Defaults without consulting the environment (used by tests).
    fn default() -> Self {
        ServerConfig {
            http_port: 5000,
            database_path: "dukaan.db".to_string(),
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            session_lifetime_secs: 43_200,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.session_lifetime_secs, 43_200);
    }
}
