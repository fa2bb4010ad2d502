//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STORE_BASE_URL` - Base URL of the record store API (e.g. `http://localhost:5000/api`)
//!
//! ## Optional
//! - `STORE_API_KEY` - Bearer token sent to the record store
//! - `STORE_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `STATS_DAY_BUCKETS` - `dense` or `sparse` day buckets (default: dense)
//! - `DEFAULT_PAGE_SIZE` - Table page size, one of 5/10/20/50/100 (default: 10)
//! - `LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::stats::BucketPolicy;
use crate::table::PageSize;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 30;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Record store connection
    pub store: StoreConfig,
    /// Whether empty day buckets appear in the orders-over-time chart
    pub day_buckets: BucketPolicy,
    /// Page size used when a request does not pick one
    pub default_page_size: PageSize,
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

/// Record store connection settings.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL; collection paths are appended to it.
    pub base_url: Url,
    /// Optional bearer token
    pub api_key: Option<SecretString>,
    /// Timeout applied to every request
    pub timeout: Duration,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl StoreConfig {
    /// Settings for `base_url` with no key and the default timeout.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
        }
    }

    /// Load the store settings alone.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `STORE_BASE_URL` is missing or invalid, or
    /// if `STORE_API_KEY` looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(&get_required_env("STORE_BASE_URL")?)?;
        let api_key = get_optional_env("STORE_API_KEY")
            .map(|key| {
                validate_secret_strength(&key, "STORE_API_KEY")?;
                Ok::<_, ConfigError>(SecretString::from(key))
            })
            .transpose()?;
        let timeout_secs = parse_env_or_default("STORE_TIMEOUT_SECS", DEFAULT_STORE_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STORE_TIMEOUT_SECS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        let store = StoreConfig::from_env()?;

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = parse_env_or_default("ADMIN_PORT", 3001_u16)?;
        let day_buckets = get_env_or_default("STATS_DAY_BUCKETS", "dense")
            .parse::<BucketPolicy>()
            .map_err(|e| ConfigError::InvalidEnvVar("STATS_DAY_BUCKETS".to_string(), e))?;
        let default_page_size = parse_page_size(&get_env_or_default("DEFAULT_PAGE_SIZE", "10"))?;
        let log_format = parse_log_format(get_optional_env("LOG_FORMAT").as_deref())?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            store,
            day_buckets,
            default_page_size,
            log_format,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse the store base URL. Only `http` and `https` URLs are accepted.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("STORE_BASE_URL".to_string(), reason);
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(url)
}

fn parse_page_size(raw: &str) -> Result<PageSize, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("DEFAULT_PAGE_SIZE".to_string(), reason);
    let size = raw.trim().parse::<usize>().map_err(|e| invalid(e.to_string()))?;
    PageSize::try_from(size).map_err(invalid)
}

fn parse_log_format(raw: Option<&str>) -> Result<LogFormat, ConfigError> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("" | "text") => Ok(LogFormat::Text),
        Some("json") => Ok(LogFormat::Json),
        Some(other) => Err(ConfigError::InvalidEnvVar(
            "LOG_FORMAT".to_string(),
            format!("expected text or json, got '{other}'"),
        )),
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated key."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_shannon_entropy() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
        assert!(shannon_entropy("aB3$xY9!mK2@nL5#") > 3.3);
    }

    #[test]
    fn test_placeholder_keys_are_rejected() {
        for key in ["your-api-key-here", "changeme123", "example-token"] {
            let err = validate_secret_strength(key, "STORE_API_KEY").unwrap_err();
            assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
        }
    }

    #[test]
    fn test_low_entropy_key_is_rejected() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "STORE_API_KEY");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_random_key_is_accepted() {
        assert!(validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "STORE_API_KEY").is_ok());
    }

    #[test]
    fn test_parse_base_url() {
        let url = parse_base_url(" http://localhost:5000/api ").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api");
        assert!(parse_base_url("not a url").is_err());
        assert!(matches!(
            parse_base_url("ftp://files.local/"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_parse_page_size() {
        assert_eq!(parse_page_size("20").unwrap().get(), 20);
        assert!(parse_page_size("7").is_err());
        assert!(parse_page_size("ten").is_err());
    }

    #[test]
    fn test_parse_log_format() {
        assert_eq!(parse_log_format(None).unwrap(), LogFormat::Text);
        assert_eq!(parse_log_format(Some("JSON")).unwrap(), LogFormat::Json);
        assert!(parse_log_format(Some("xml")).is_err());
    }

    #[test]
    fn test_store_config_debug_redacts_key() {
        let mut store = StoreConfig::new(Url::parse("http://localhost:5000/api").unwrap());
        store.api_key = Some(SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6"));
        let debug = format!("{store:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(store.api_key.as_ref().unwrap().expose_secret()));
    }

    #[test]
    fn test_socket_addr() {
        let config = AdminConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            store: StoreConfig::new(Url::parse("http://localhost:5000/api").unwrap()),
            day_buckets: BucketPolicy::Dense,
            default_page_size: PageSize::default(),
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        };
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
    }
}
