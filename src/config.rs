// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment exactly once at startup and
//! collected into an [`AppConfig`] that is passed into state construction.
//! Nothing reads the environment after boot.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | Symmetric key for token signing/verification | Required |
//! | `TOKEN_TTL_MS` | Token time-to-live in milliseconds | `3600000` (1 hour) |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

/// Environment variable name for the token signing secret.
///
/// The secret is loaded once, held for the process lifetime, and shared
/// read-only between token issuance and verification. There is no runtime
/// rotation.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the token time-to-live in milliseconds.
pub const TOKEN_TTL_MS_ENV: &str = "TOKEN_TTL_MS";

/// Default token lifetime: one hour.
pub const DEFAULT_TOKEN_TTL_MS: i64 = 1000 * 60 * 60;

/// Errors raised while assembling [`AppConfig`] from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingSecret(&'static str),
    #[error("{name} is not a valid value: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Process-wide configuration, assembled once in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Symmetric signing key material.
    pub jwt_secret: String,
    /// Lifetime applied to every issued token, in milliseconds.
    pub token_ttl_ms: i64,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// Fails fast when the signing secret is absent or a numeric variable
    /// does not parse; a service that cannot verify tokens must not start.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret =
            env::var(JWT_SECRET_ENV).map_err(|_| ConfigError::MissingSecret(JWT_SECRET_ENV))?;

        let token_ttl_ms = match env::var(TOKEN_TTL_MS_ENV) {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: TOKEN_TTL_MS_ENV,
                value: raw,
            })?,
            Err(_) => DEFAULT_TOKEN_TTL_MS,
        };

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: raw,
            })?,
            Err(_) => 8080,
        };

        Ok(Self {
            jwt_secret,
            token_ttl_ms,
            host,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ttl_is_one_hour() {
        assert_eq!(DEFAULT_TOKEN_TTL_MS, 3_600_000);
    }

    #[test]
    fn config_error_display_names_variable() {
        let err = ConfigError::MissingSecret(JWT_SECRET_ENV);
        assert_eq!(err.to_string(), "JWT_SECRET must be set");
    }
}
