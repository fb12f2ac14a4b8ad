// src/config.rs
use crate::core::role::{DomainEndpoints, DomainSecrets};
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{0} is not a valid value: {1}")]
    Invalid(&'static str, String),
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn optional_secs(key: &'static str) -> Result<Option<Duration>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| ConfigError::Invalid(key, raw)),
        Err(_) => Ok(None),
    }
}

/// Credentials of an admin account created at boot, if configured.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    pub bind_addr: String,
    pub redis_url: String,
    pub secrets: DomainSecrets,
    pub token_ttl: Duration,
    /// Expiry applied to session entries. `None` leaves them to the cache's own policy.
    pub session_ttl: Option<Duration>,
    pub admin_seed: Option<AdminSeed>,
}

impl AccountServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let admin_seed = match (
            env::var("ADMIN_USERNAME"),
            env::var("ADMIN_EMAIL"),
            env::var("ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(email), Ok(password)) => Some(AdminSeed {
                username,
                email,
                password,
            }),
            _ => None,
        };

        let admin_secret = required("ADMIN_JWT_SECRET")?;
        let user_secret = required("USER_JWT_SECRET")?;
        // Equal secrets would make the two trust domains interchangeable.
        if admin_secret == user_secret {
            return Err(ConfigError::Invalid(
                "USER_JWT_SECRET",
                "must differ from ADMIN_JWT_SECRET".to_string(),
            ));
        }

        Ok(AccountServiceConfig {
            bind_addr: env::var("ACCOUNT_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            redis_url: required("REDIS_URL")?,
            secrets: DomainSecrets::new(admin_secret, user_secret),
            token_ttl: optional_secs("TOKEN_TTL_SECS")?.unwrap_or(Duration::from_secs(3600)),
            session_ttl: optional_secs("SESSION_TTL_SECS")?,
            admin_seed,
        })
    }
}

/// Settings shared by the services that delegate authorization.
#[derive(Debug, Clone)]
pub struct DownstreamConfig {
    pub bind_addr: String,
    pub account_service_url: String,
    /// `None` keeps the HTTP client's default, which never times out.
    pub account_timeout: Option<Duration>,
}

impl DownstreamConfig {
    /// `bind_key` is the service's own bind address variable, e.g. `BOOK_BIND_ADDR`.
    pub fn from_env(bind_key: &'static str, default_bind: &str) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Ok(DownstreamConfig {
            bind_addr: env::var(bind_key).unwrap_or_else(|_| default_bind.to_string()),
            account_service_url: required("ACCOUNT_SERVICE_URL")?,
            account_timeout: optional_secs("ACCOUNT_SERVICE_TIMEOUT_SECS")?,
        })
    }

    pub fn endpoints(&self) -> DomainEndpoints {
        DomainEndpoints::from_base_url(&self.account_service_url)
    }
}
