//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `FAKESTORE_API_URL` - Catalog API base URL (default: <https://fakestoreapi.com>)
//! - `FAKESTORE_API_TOKEN` - Bearer token sent with catalog requests
//! - `FAKESTORE_TIMEOUT_SECS` - HTTP request timeout (default: 10)
//! - `FAKESTORE_CACHE_TTL_SECS` - Catalog response cache TTL (default: 300)
//! - `FAKESTORE_DATA_DIR` - Directory for the durable cart medium (default: .fakestore)
//! - `FAKESTORE_CART_PREFER` - Primary cart medium, `local` or `session` (default: local)

use std::path::PathBuf;
use std::time::Duration;

use fakestore_cart::StoragePreference;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "https://fakestoreapi.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_DATA_DIR: &str = ".fakestore";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API client configuration
    pub catalog: CatalogConfig,
    /// Directory holding the durable cart medium
    pub data_dir: PathBuf,
    /// Which cart medium is written on every mutation
    pub cart_preference: StoragePreference,
}

/// Catalog API client configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// API base URL
    pub base_url: Url,
    /// Bearer token for authenticated requests
    pub token: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
    /// How long catalog responses stay cached
    pub cache_ttl: Duration,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = match get("FAKESTORE_API_URL") {
            Some(raw) => Url::parse(&raw)
                .map_err(|e| ConfigError::InvalidEnvVar("FAKESTORE_API_URL".to_string(), e.to_string()))?,
            None => default_api_url(),
        };
        let token = get("FAKESTORE_API_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .map(SecretString::from);
        let timeout = parse_secs(&get, "FAKESTORE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let cache_ttl = parse_secs(&get, "FAKESTORE_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?;

        let data_dir = get("FAKESTORE_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let cart_preference = match get("FAKESTORE_CART_PREFER") {
            Some(raw) => raw
                .parse::<StoragePreference>()
                .map_err(|e| ConfigError::InvalidEnvVar("FAKESTORE_CART_PREFER".to_string(), e))?,
            None => StoragePreference::default(),
        };

        Ok(Self {
            catalog: CatalogConfig {
                base_url,
                token,
                timeout,
                cache_ttl,
            },
            data_dir,
            cart_preference,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).unwrap_or_else(|_| unreachable!("DEFAULT_API_URL is valid"))
}

/// Parse a whole number of seconds, falling back to `default` when unset.
fn parse_secs(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<Duration, ConfigError> {
    let secs = match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?,
        None => default,
    };
    Ok(Duration::from_secs(secs))
}
