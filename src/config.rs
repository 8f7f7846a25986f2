// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Bootstrap credentials for the first FitBro Admin account.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub mobile: String,
    pub password: String,
    pub name: String,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string
    pub database_url: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Bearer token lifetime in hours
    pub token_ttl_hours: i64,
    /// When false, the role gate admits every authenticated caller.
    /// Only meant for local development.
    pub enforce_roles: bool,
    /// Root directory for uploaded files, served at `/static`
    pub upload_dir: PathBuf,
    pub max_logo_bytes: usize,
    pub admin_seed: Option<AdminSeed>,
    /// Initial password for gym owners created without one
    pub default_owner_password: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            token_ttl_hours: 12,
            enforce_roles: true,
            upload_dir: env::temp_dir().join("fitbro-test-static"),
            max_logo_bytes: 2 * 1024 * 1024,
            admin_seed: None,
            default_owner_password: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, reading `.env`
    /// first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let admin_seed = match (env::var("ADMIN_MOBILE"), env::var("ADMIN_PASSWORD")) {
            (Ok(mobile), Ok(password)) => Some(AdminSeed {
                mobile: mobile.trim().to_string(),
                password,
                name: env::var("ADMIN_NAME").unwrap_or_else(|_| "FitBro Admin".to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://./data/fitbro.db".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: parse_var("PORT", 8080)?,
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            token_ttl_hours: parse_var("TOKEN_TTL_HOURS", 12)?,
            enforce_roles: parse_var("ENFORCE_ROLES", true)?,
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "./static".to_string())
                .into(),
            max_logo_bytes: parse_var("MAX_LOGO_BYTES", 2 * 1024 * 1024)?,
            admin_seed,
            default_owner_password: env::var("DEFAULT_OWNER_PASSWORD").ok(),
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, value)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
