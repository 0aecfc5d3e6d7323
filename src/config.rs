/*
 * Responsibility
 * - Read listen address, broker credentials and transport limits from env
 * - Fail startup on missing/invalid values
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// One accepted username/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct BrokerCredentials {
    pub username: String,
    pub password: String,
}

impl BrokerCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for BrokerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub credentials: Vec<BrokerCredentials>,
    pub body_limit_bytes: usize,
}

pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = match std::env::var("PORT") {
            Ok(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 3000,
        };

        let addr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let username =
            std::env::var("BROKER_USERNAME").map_err(|_| ConfigError::Missing("BROKER_USERNAME"))?;
        let password =
            std::env::var("BROKER_PASSWORD").map_err(|_| ConfigError::Missing("BROKER_PASSWORD"))?;

        let mut credentials = vec![BrokerCredentials::new(username, password)];
        if let Ok(extra) = std::env::var("BROKER_EXTRA_CREDENTIALS") {
            credentials.extend(parse_credential_list(&extra)?);
        }

        let body_limit_bytes = match std::env::var("BROKER_BODY_LIMIT_BYTES") {
            Ok(v) => v
                .parse::<usize>()
                .map_err(|_| ConfigError::Invalid("BROKER_BODY_LIMIT_BYTES"))?,
            Err(_) => DEFAULT_BODY_LIMIT_BYTES,
        };

        Ok(Self {
            addr,
            credentials,
            body_limit_bytes,
        })
    }
}

/// `user:pass,user:pass`; blank entries are skipped.
fn parse_credential_list(raw: &str) -> Result<Vec<BrokerCredentials>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            pair.split_once(':')
                .filter(|(user, _)| !user.is_empty())
                .map(|(user, pass)| BrokerCredentials::new(user, pass))
                .ok_or(ConfigError::Invalid("BROKER_EXTRA_CREDENTIALS"))
        })
        .collect()
}
