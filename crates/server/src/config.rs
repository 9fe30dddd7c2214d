//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `NGANTRI_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `NGANTRI_HOST` - Bind address (default: 0.0.0.0)
//! - `NGANTRI_PORT` - Listen port (falls back to `PORT`, default: 8080)
//! - `NGANTRI_BASE_URL` - Public URL (default: `http://localhost:{port}`)
//! - `NGANTRI_UTC_OFFSET_HOURS` - Business timezone offset (default: 7)
//! - `NGANTRI_SESSION_SECRET` - Session signing secret (min 32 chars, high entropy)
//! - `NGANTRI_PUBLIC_DIR` - Static asset directory (default: crates/server/public)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use ngantri_core::BusinessCalendar;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

const DEFAULT_PUBLIC_DIR: &str = "crates/server/public";

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
    "insert",
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

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, used to decide whether cookies are `Secure`
    pub base_url: String,
    /// Timezone that decides when queue numbering restarts
    pub calendar: BusinessCalendar,
    /// Session signing secret, only needed by deployments that sign sessions
    pub session_secret: Option<SecretString>,
    /// Directory served under `/public`
    pub public_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the session secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(&lookup);

        let database_url = vars
            .first_of(&["NGANTRI_DATABASE_URL", "DATABASE_URL"])
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("NGANTRI_DATABASE_URL".to_string()))?;

        let host = vars
            .or_default("NGANTRI_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("NGANTRI_HOST".to_string(), e.to_string()))?;

        let port = vars
            .first_of(&["NGANTRI_PORT", "PORT"])
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("NGANTRI_PORT".to_string(), e.to_string()))?;

        let base_url = vars
            .get("NGANTRI_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"));

        let offset_hours = vars
            .or_default("NGANTRI_UTC_OFFSET_HOURS", "7")
            .parse::<i32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("NGANTRI_UTC_OFFSET_HOURS".to_string(), e.to_string())
            })?;
        let calendar = BusinessCalendar::from_offset_hours(offset_hours).map_err(|e| {
            ConfigError::InvalidEnvVar("NGANTRI_UTC_OFFSET_HOURS".to_string(), e.to_string())
        })?;

        let session_secret = match vars.get("NGANTRI_SESSION_SECRET") {
            Some(value) => {
                validate_secret_strength(&value, "NGANTRI_SESSION_SECRET")?;
                let secret = SecretString::from(value);
                validate_session_secret(&secret, "NGANTRI_SESSION_SECRET")?;
                Some(secret)
            }
            None => None,
        };

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            calendar,
            session_secret,
            public_dir: PathBuf::from(vars.or_default("NGANTRI_PUBLIC_DIR", DEFAULT_PUBLIC_DIR)),
            sentry_dsn: vars.get("SENTRY_DSN"),
            sentry_environment: vars.get("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the public URL is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source with the empty-string-means-unset rule applied.
struct Vars<'a, F>(&'a F);

impl<F> Vars<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn first_of(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.get(key))
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
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
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(**p)) {
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
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("NGANTRI_DATABASE_URL", "postgres://localhost/ngantri")]).unwrap();

        assert_eq!(config.database_url.expose_secret(), "postgres://localhost/ngantri");
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.calendar, BusinessCalendar::default());
        assert!(config.session_secret.is_none());
        assert_eq!(config.public_dir, PathBuf::from(DEFAULT_PUBLIC_DIR));
        assert!(!config.is_secure());
    }

    #[test]
    fn test_missing_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "NGANTRI_DATABASE_URL"));
    }

    #[test]
    fn test_generic_fallbacks() {
        let config = load(&[
            ("DATABASE_URL", "postgres://fallback/db"),
            ("PORT", "9090"),
        ])
        .unwrap();

        assert_eq!(config.database_url.expose_secret(), "postgres://fallback/db");
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_prefixed_vars_win() {
        let config = load(&[
            ("NGANTRI_DATABASE_URL", "postgres://primary/db"),
            ("DATABASE_URL", "postgres://fallback/db"),
            ("NGANTRI_PORT", "3000"),
            ("PORT", "9090"),
        ])
        .unwrap();

        assert_eq!(config.database_url.expose_secret(), "postgres://primary/db");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[
            ("NGANTRI_DATABASE_URL", "postgres://localhost/ngantri"),
            ("NGANTRI_PORT", "eighty"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref v, _) if v == "NGANTRI_PORT"));
    }

    #[test]
    fn test_offset_out_of_range() {
        let err = load(&[
            ("NGANTRI_DATABASE_URL", "postgres://localhost/ngantri"),
            ("NGANTRI_UTC_OFFSET_HOURS", "20"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref v, _) if v == "NGANTRI_UTC_OFFSET_HOURS"));
    }

    #[test]
    fn test_session_secret_rejected_when_weak() {
        let err = load(&[
            ("NGANTRI_DATABASE_URL", "postgres://localhost/ngantri"),
            ("NGANTRI_SESSION_SECRET", "changeme-changeme-changeme-changeme"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_session_secret_accepted_when_strong() {
        let config = load(&[
            ("NGANTRI_DATABASE_URL", "postgres://localhost/ngantri"),
            ("NGANTRI_SESSION_SECRET", "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6%"),
        ])
        .unwrap();
        assert!(config.session_secret.is_some());
    }

    #[test]
    fn test_https_base_url_is_secure() {
        let config = load(&[
            ("NGANTRI_DATABASE_URL", "postgres://localhost/ngantri"),
            ("NGANTRI_BASE_URL", "https://antrian.example.id"),
        ])
        .unwrap();
        assert!(config.is_secure());
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("changeme123", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_session_secret_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_session_secret(&secret, "TEST_SESSION").is_err());
    }

    #[test]
    fn test_config_debug_redacts_secrets() {
        let config = load(&[("NGANTRI_DATABASE_URL", "postgres://user:hunter2@db/ngantri")]).unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("hunter2"));
    }
}
