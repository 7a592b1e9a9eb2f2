//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MONGO_URL` - MongoDB connection string
//! - `DB_NAME` - Database name
//! - `JWT_SECRET` - Bearer-token signing secret (min 32 chars)
//!
//! ## Optional
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 8000)
//! - `CORS_ORIGINS` - Comma-separated origins, or `*` (default: `*`)
//! - `SMTP_SERVER` / `SMTP_PORT` / `SMTP_USERNAME` / `SMTP_PASSWORD` /
//!   `SMTP_FROM_EMAIL` - Fallback mail settings when none are stored
//! - `RAZORPAY_KEY_ID` / `RAZORPAY_KEY_SECRET` / `RAZORPAY_ENABLED` -
//!   Fallback payment-gateway settings
//! - `RAZORPAY_BASE_URL` - Gateway API base (default: `https://api.razorpay.com`)
//! - `WHATSAPP_NUMBER` - Fallback WhatsApp contact number
//! - `INSTAGRAM_URL` - Public Instagram link
//! - `UPLOAD_DIR` - Directory for uploaded images (default: `uploads`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_JWT_SECRET_LENGTH: usize = 32;

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

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// MongoDB connection URL (may contain credentials)
    pub mongo_url: SecretString,
    /// Database name
    pub db_name: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins; empty means allow any
    pub cors_origins: Vec<String>,
    /// Bearer-token signing secret
    pub jwt_secret: SecretString,
    /// Fallback mail settings used when none are stored in the database
    pub smtp: SmtpDefaults,
    /// Fallback payment-gateway settings
    pub razorpay: RazorpayDefaults,
    /// Fallback WhatsApp contact number
    pub whatsapp_number: String,
    /// Public Instagram link
    pub instagram_url: String,
    /// Directory where uploaded images are stored
    pub upload_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Environment fallbacks for mail delivery.
#[derive(Clone)]
pub struct SmtpDefaults {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_email: String,
}

impl std::fmt::Debug for SmtpDefaults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpDefaults")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from_email", &self.from_email)
            .finish()
    }
}

/// Environment fallbacks for the payment gateway.
#[derive(Clone)]
pub struct RazorpayDefaults {
    pub enabled: bool,
    pub key_id: String,
    pub key_secret: SecretString,
    /// Gateway API base URL; overridable so tests can point at a stub.
    pub base_url: String,
}

impl std::fmt::Debug for RazorpayDefaults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayDefaults")
            .field("enabled", &self.enabled)
            .field("key_id", &self.key_id)
            .field("key_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the JWT secret fails the length check.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let mongo_url = SecretString::from(get_required_env("MONGO_URL")?);
        let db_name = get_required_env("DB_NAME")?;
        let host = get_env_or_default("HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;

        let cors_origins = parse_cors_origins(&get_env_or_default("CORS_ORIGINS", "*"));

        let jwt_secret = SecretString::from(get_required_env("JWT_SECRET")?);
        validate_jwt_secret(&jwt_secret, "JWT_SECRET")?;

        let smtp = SmtpDefaults::from_env()?;
        let razorpay = RazorpayDefaults::from_env();

        Ok(Self {
            mongo_url,
            db_name,
            host,
            port,
            cors_origins,
            jwt_secret,
            smtp,
            razorpay,
            whatsapp_number: get_env_or_default("WHATSAPP_NUMBER", ""),
            instagram_url: get_env_or_default("INSTAGRAM_URL", ""),
            upload_dir: PathBuf::from(get_env_or_default("UPLOAD_DIR", "uploads")),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SmtpDefaults {
    fn from_env() -> Result<Self, ConfigError> {
        let port = get_env_or_default("SMTP_PORT", "2525")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SMTP_PORT".to_string(), e.to_string()))?;
        Ok(Self {
            server: get_env_or_default("SMTP_SERVER", "mail.smtp2go.com"),
            port,
            username: get_env_or_default("SMTP_USERNAME", ""),
            password: SecretString::from(get_env_or_default("SMTP_PASSWORD", "")),
            from_email: get_env_or_default("SMTP_FROM_EMAIL", "noreply@seedleaf.example"),
        })
    }
}

impl RazorpayDefaults {
    fn from_env() -> Self {
        Self {
            enabled: get_env_or_default("RAZORPAY_ENABLED", "true")
                .eq_ignore_ascii_case("true"),
            key_id: get_env_or_default("RAZORPAY_KEY_ID", ""),
            key_secret: SecretString::from(get_env_or_default("RAZORPAY_KEY_SECRET", "")),
            base_url: get_env_or_default("RAZORPAY_BASE_URL", "https://api.razorpay.com"),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse the CORS origin list. `*` (or empty) means allow any origin.
fn parse_cors_origins(raw: &str) -> Vec<String> {
    if raw.trim() == "*" || raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Validate that the token-signing secret meets minimum length requirements.
fn validate_jwt_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_JWT_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cors_wildcard_means_any() {
        assert!(parse_cors_origins("*").is_empty());
        assert!(parse_cors_origins("").is_empty());
    }

    #[test]
    fn cors_list_is_split_and_trimmed() {
        let origins = parse_cors_origins("https://a.example, https://b.example ,");
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn jwt_secret_too_short_rejected() {
        let secret = SecretString::from("short");
        assert!(validate_jwt_secret(&secret, "TEST").is_err());
    }

    #[test]
    fn jwt_secret_valid_length_accepted() {
        let secret = SecretString::from("x".repeat(32));
        assert!(validate_jwt_secret(&secret, "TEST").is_ok());
    }

    #[test]
    fn smtp_defaults_debug_redacts_password() {
        let smtp = SmtpDefaults {
            server: "mail.example".to_string(),
            port: 2525,
            username: "user".to_string(),
            password: SecretString::from("hunter2hunter2"),
            from_email: "noreply@example.com".to_string(),
        };
        let debug = format!("{smtp:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }
}
