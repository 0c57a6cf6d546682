//! Application configuration module
//!
//! Configuration is read from environment variables (optionally populated from
//! a `.env` file by the binary) and validated through [`AppConfigBuilder`].
//! A missing signing secret is a fatal error: the server refuses to start
//! rather than run with authentication disabled.
//!
//! | Variable | Default |
//! |---|---|
//! | `JWT_SECRET` | required |
//! | `ACCESS_TOKEN_TTL_MINUTES` | 15 |
//! | `BCRYPT_COST` | `bcrypt::DEFAULT_COST` |
//! | `TOKEN_TRANSPORT` | `header` |
//! | `DATABASE_URL` | unset (in-memory stores) |
//! | `SERVER_PORT` | 3000 |

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Access token lifetime used when `ACCESS_TOKEN_TTL_MINUTES` is unset
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 15;

/// Port used when `SERVER_PORT` is unset
pub const DEFAULT_PORT: u16 = 3000;

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Where protected routes look for the access token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenTransport {
    /// `Authorization: Bearer <token>`
    #[default]
    Header,
    /// `Cookie: access_token=<token>`
    Cookie,
    /// Header first, then cookie
    Both,
}

impl TokenTransport {
    /// Whether login should also set the `access_token` cookie
    pub fn uses_cookie(self) -> bool {
        matches!(self, Self::Cookie | Self::Both)
    }
}

impl FromStr for TokenTransport {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "header" | "bearer" => Ok(Self::Header),
            "cookie" => Ok(Self::Cookie),
            "both" => Ok(Self::Both),
            other => Err(ConfigError::InvalidValue {
                key: "TOKEN_TRANSPORT",
                value: other.to_string(),
            }),
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Lifetime of minted access tokens, in minutes
    pub token_ttl_minutes: i64,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
    /// Token transport for protected routes
    pub transport: TokenTransport,
    /// Optional SQLite URL; in-memory stores are used when absent
    pub database_url: Option<String>,
    /// Listening port
    pub port: u16,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("transport", &self.transport)
            .field("database_url", &self.database_url)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut builder = Self::builder();

        if let Some(secret) = get("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(raw) = get("ACCESS_TOKEN_TTL_MINUTES") {
            builder = builder.token_ttl_minutes(parse_value("ACCESS_TOKEN_TTL_MINUTES", &raw)?);
        }
        if let Some(raw) = get("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_value("BCRYPT_COST", &raw)?);
        }
        if let Some(raw) = get("TOKEN_TRANSPORT") {
            builder = builder.transport(raw.parse()?);
        }
        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(raw) = get("SERVER_PORT") {
            builder = builder.port(parse_value("SERVER_PORT", &raw)?);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.token_ttl_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "ACCESS_TOKEN_TTL_MINUTES",
                value: self.token_ttl_minutes.to_string(),
            });
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// Builder for AppConfig
#[derive(Default)]
pub struct AppConfigBuilder {
    jwt_secret: Option<String>,
    token_ttl_minutes: Option<i64>,
    bcrypt_cost: Option<u32>,
    transport: Option<TokenTransport>,
    database_url: Option<String>,
    port: Option<u16>,
}

impl AppConfigBuilder {
    /// Set the signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Set the access token lifetime
    pub fn token_ttl_minutes(mut self, minutes: i64) -> Self {
        self.token_ttl_minutes = Some(minutes);
        self
    }

    /// Set the bcrypt work factor
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Set the token transport
    pub fn transport(mut self, transport: TokenTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the SQLite database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the listening port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            jwt_secret: self.jwt_secret.ok_or(ConfigError::MissingValue("JWT_SECRET"))?,
            token_ttl_minutes: self.token_ttl_minutes.unwrap_or(DEFAULT_TOKEN_TTL_MINUTES),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST),
            transport: self.transport.unwrap_or_default(),
            database_url: self.database_url,
            port: self.port.unwrap_or(DEFAULT_PORT),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let result = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingValue("JWT_SECRET"));
    }

    #[test]
    fn test_blank_secret_is_fatal() {
        let result = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "   ")]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingValue("JWT_SECRET"));
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.token_ttl_minutes, DEFAULT_TOKEN_TTL_MINUTES);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.transport, TokenTransport::Header);
        assert_eq!(config.database_url, None);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("ACCESS_TOKEN_TTL_MINUTES", "30"),
            ("BCRYPT_COST", "4"),
            ("TOKEN_TRANSPORT", "Both"),
            ("DATABASE_URL", "sqlite://auth.db"),
            ("SERVER_PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.token_ttl_minutes, 30);
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.transport, TokenTransport::Both);
        assert_eq!(config.database_url.as_deref(), Some("sqlite://auth.db"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_rejects_non_positive_ttl() {
        let result = AppConfig::builder().jwt_secret("s").token_ttl_minutes(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "ACCESS_TOKEN_TTL_MINUTES", .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_cost() {
        let result = AppConfig::builder().jwt_secret("s").bcrypt_cost(3).build();
        assert!(matches!(result, Err(ConfigError::InvalidValue { key: "BCRYPT_COST", .. })));
    }

    #[test]
    fn test_rejects_unparsable_number() {
        let result = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("SERVER_PORT", "eighty"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { key: "SERVER_PORT", .. })));
    }

    #[test]
    fn test_unknown_transport() {
        assert!("carrier-pigeon".parse::<TokenTransport>().is_err());
        assert!(TokenTransport::Cookie.uses_cookie());
        assert!(!TokenTransport::Header.uses_cookie());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AppConfig::builder().jwt_secret("top-secret-value").build().unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("top-secret-value"));
        assert!(rendered.contains("<redacted>"));
    }
}
