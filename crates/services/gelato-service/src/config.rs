//! Gelato service configuration.

use std::env;

use common::{ConfigError, DatabaseConfig, JwtConfig, ServerConfig};
use domain::DEFAULT_JWT_EXPIRATION_HOURS;

/// Signing key used when `JWT_SECRET` is unset in debug builds.
const DEV_JWT_SECRET: &str = "gelato-development-secret-change-me-please";

/// Gelato service configuration.
#[derive(Debug, Clone)]
pub struct GelatoConfig {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub server: ServerConfig,
}

impl GelatoConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `.env` first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or_else(|_| DatabaseConfig::default().url),
            ..DatabaseConfig::default()
        };

        let expiration_hours = match env::var("JWT_EXPIRATION_HOURS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "JWT_EXPIRATION_HOURS",
                value: raw,
            })?,
            Err(_) => DEFAULT_JWT_EXPIRATION_HOURS,
        };
        let jwt = JwtConfig::new(jwt_secret()?, expiration_hours)?;

        let server = ServerConfig {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| ServerConfig::default().host),
            port: match env::var("SERVER_PORT") {
                Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                    name: "SERVER_PORT",
                    value: raw,
                })?,
                Err(_) => ServerConfig::default().port,
            },
        };

        Ok(Self {
            database,
            jwt,
            server,
        })
    }
}

/// Read `JWT_SECRET`, falling back to a development key in debug builds.
fn jwt_secret() -> Result<String, ConfigError> {
    match env::var("JWT_SECRET") {
        Ok(secret) => Ok(secret),
        Err(_) if cfg!(debug_assertions) => {
            // Development mode: use default but warn
            tracing::warn!("JWT_SECRET not set, using insecure default for development");
            Ok(DEV_JWT_SECRET.to_string())
        }
        Err(_) => Err(ConfigError::Missing("JWT_SECRET")),
    }
}

impl Default for GelatoConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            jwt: JwtConfig {
                secret: DEV_JWT_SECRET.to_string(),
                expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            },
            server: ServerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::MIN_JWT_SECRET_LENGTH;

    #[test]
    fn test_default_secret_meets_minimum() {
        let config = GelatoConfig::default();
        assert!(config.jwt.secret.len() >= MIN_JWT_SECRET_LENGTH);
        assert_eq!(config.jwt.expiration_hours, 24);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = GelatoConfig::default();
        assert!(!format!("{:?}", config).contains(DEV_JWT_SECRET));
    }
}
