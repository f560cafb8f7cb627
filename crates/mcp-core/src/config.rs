//! Environment-driven configuration.
//!
//! The adapter takes no command-line flags. Everything is read from the
//! process environment once at startup (binaries load a `.env` file first)
//! and shared read-only afterwards.
//!
//! # Examples
//!
//! ```
//! use datamaker_mcp_core::Config;
//!
//! let config = Config::from_lookup(|key| match key {
//!     "DATAMAKER_API_URL" => Some("https://api.example.com".to_string()),
//!     "RESPONSE_TOKEN_THRESHOLD" => Some("2000".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! assert_eq!(config.api_url, "https://api.example.com");
//! assert_eq!(config.token_threshold, 2000);
//! assert_eq!(config.port, 8001);
//! ```

use crate::{Error, Result};
use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

/// Default remote API base URL.
pub const DEFAULT_API_URL: &str = "https://api.datamaker.dev.automators.com";
/// Default HTTP transport port.
pub const DEFAULT_PORT: u16 = 8001;
/// Default token budget for inline tool responses.
pub const DEFAULT_TOKEN_THRESHOLD: usize = 5000;
/// Default overflow bucket.
pub const DEFAULT_BUCKET: &str = "datamaker-chat";
/// Default overflow bucket region.
pub const DEFAULT_REGION: &str = "auto";
/// Default timeout for outbound HTTP requests, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Process-wide adapter configuration.
///
/// Built once by [`Config::from_env`] and never mutated afterwards.
#[derive(Debug)]
pub struct Config {
    /// Base URL of the DataMaker API (no trailing slash).
    pub api_url: String,

    /// Credential used when a request carries none of its own.
    ///
    /// The stdio transport always relies on it; the HTTP transport only when
    /// the inbound request has no bearer token.
    pub api_key: Option<SecretString>,

    /// Listening port of the HTTP transport.
    pub port: u16,

    /// Object storage for oversized responses.
    pub storage: StorageConfig,

    /// Responses whose estimated token count exceeds this are summarized.
    pub token_threshold: usize,

    /// Timeout applied to every outbound HTTP request.
    pub request_timeout: Duration,
}

/// Where oversized responses are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    /// S3 or an S3-compatible service.
    #[default]
    S3,
    /// In-process store for local runs without a bucket; blobs are lost on exit.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s3" | "r2" => Ok(Self::S3),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected 's3' or 'memory', got '{other}'")),
        }
    }
}

/// Object storage settings (S3 or an S3-compatible service such as R2).
#[derive(Debug)]
pub struct StorageConfig {
    /// Storage backend (`OVERFLOW_STORE`).
    pub backend: StorageBackend,

    /// Bucket receiving overflow blobs.
    pub bucket: String,

    /// Bucket region (`auto` for R2).
    pub region: String,

    /// Custom endpoint URL; `None` uses the AWS default for the region.
    pub endpoint: Option<String>,

    /// Static access key id; `None` uses the default provider chain.
    pub access_key_id: Option<String>,

    /// Static secret access key, paired with `access_key_id`.
    pub secret_access_key: Option<SecretString>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            bucket: DEFAULT_BUCKET.to_string(),
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            port: DEFAULT_PORT,
            storage: StorageConfig::default(),
            token_threshold: DEFAULT_TOKEN_THRESHOLD,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when a numeric variable does not parse
    /// or the resulting configuration fails [`Config::validate`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_url = get("DATAMAKER_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let config = Self {
            api_url,
            api_key: get("DATAMAKER_API_KEY").map(SecretString::from),
            port: parse_var("PORT", get("PORT"), DEFAULT_PORT)?,
            storage: StorageConfig {
                backend: parse_var("OVERFLOW_STORE", get("OVERFLOW_STORE"), StorageBackend::S3)?,
                bucket: get("R2_BUCKET_NAME").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
                region: get("R2_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
                endpoint: get("R2_URL"),
                access_key_id: get("R2_ACCESS_KEY_ID"),
                secret_access_key: get("R2_SECRET").map(SecretString::from),
            },
            token_threshold: parse_var(
                "RESPONSE_TOKEN_THRESHOLD",
                get("RESPONSE_TOKEN_THRESHOLD"),
                DEFAULT_TOKEN_THRESHOLD,
            )?,
            request_timeout: Duration::from_secs(parse_var(
                "DATAMAKER_REQUEST_TIMEOUT_SECS",
                get("DATAMAKER_REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if:
    /// - the API URL is not an `http://` or `https://` URL
    /// - the token threshold or request timeout is zero
    /// - the bucket name is empty
    /// - only one half of the static storage credentials is set
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(Error::ConfigError {
                message: format!(
                    "DATAMAKER_API_URL must start with http:// or https://, got '{}'",
                    self.api_url
                ),
            });
        }

        if self.token_threshold == 0 {
            return Err(Error::ConfigError {
                message: "RESPONSE_TOKEN_THRESHOLD must be greater than zero".to_string(),
            });
        }

        if self.request_timeout.is_zero() {
            return Err(Error::ConfigError {
                message: "DATAMAKER_REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            });
        }

        if self.storage.bucket.trim().is_empty() {
            return Err(Error::ConfigError {
                message: "R2_BUCKET_NAME cannot be empty".to_string(),
            });
        }

        if self.storage.access_key_id.is_some() != self.storage.secret_access_key.is_some() {
            return Err(Error::ConfigError {
                message: "R2_ACCESS_KEY_ID and R2_SECRET must be set together".to_string(),
            });
        }

        Ok(())
    }
}

fn parse_var<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e| Error::ConfigError {
            message: format!("{key} has invalid value '{value}': {e}"),
        }),
    }
}
