//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any request
//! is made.
//!
//! ## Variables
//!
//! - `LOGIN_URL` - Submission target of the login form. Without it the
//!   client starts, but every submit aborts with a configuration error.
//! - `CAPTCHA_ENABLED` - `true`/`1` to require a CAPTCHA token per submit
//!   (default: `false`)
//! - `HTTP_TIMEOUT_SECS` - Whole-request timeout for the login POST
//!   (default: 30)
//! - `CAPTCHA_TIMEOUT_SECS` - Bound on the wait for a solved token
//!   (default: 120)
//! - `EXPIRY_STORE_PATH` - Where the session-expiry record is persisted
//!   (default: `login-state.json`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Target URL of the login POST; `None` leaves the form unconfigured.
    pub login_url: Option<String>,
    pub captcha_enabled: bool,
    pub http_timeout_secs: u64,
    pub captcha_timeout_secs: u64,
    pub expiry_store_path: PathBuf,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        let login_url = env::var("LOGIN_URL").ok().filter(|v| !v.is_empty());

        let captcha_enabled = env::var("CAPTCHA_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let http_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let captcha_timeout_secs = env::var("CAPTCHA_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(120);

        let expiry_store_path = env::var("EXPIRY_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("login-state.json"));

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Self {
            login_url,
            captcha_enabled,
            http_timeout_secs,
            captcha_timeout_secs,
            expiry_store_path,
            log_level,
            log_format,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `LOGIN_URL` is set but is not an absolute http(s) URL
    /// - a timeout is zero or unreasonably large
    /// - `LOG_FORMAT` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if let Some(ref login_url) = self.login_url {
            let parsed = url::Url::parse(login_url)
                .map_err(|e| anyhow::anyhow!("LOGIN_URL is not a valid URL: {}", e))?;

            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                anyhow::bail!(
                    "LOGIN_URL must use http or https, got '{}'",
                    parsed.scheme()
                );
            }
        }

        if self.http_timeout_secs == 0 || self.http_timeout_secs > 300 {
            anyhow::bail!(
                "HTTP_TIMEOUT_SECS must be between 1 and 300, got {}",
                self.http_timeout_secs
            );
        }

        if self.captcha_timeout_secs == 0 || self.captcha_timeout_secs > 600 {
            anyhow::bail!(
                "CAPTCHA_TIMEOUT_SECS must be between 1 and 600, got {}",
                self.captcha_timeout_secs
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");

        match self.login_url {
            Some(ref url) => tracing::info!("  Login URL: {}", url),
            None => tracing::info!("  Login URL: not set"),
        }

        tracing::info!(
            "  CAPTCHA: {}",
            if self.captcha_enabled {
                "enabled"
            } else {
                "disabled"
            }
        );
        tracing::info!("  HTTP timeout: {}s", self.http_timeout_secs);
        tracing::info!("  Expiry store: {}", self.expiry_store_path.display());
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn base_config() -> Config {
        Config {
            login_url: Some("https://login.example.com/api/login".to_string()),
            captcha_enabled: false,
            http_timeout_secs: 30,
            captcha_timeout_secs: 120,
            expiry_store_path: PathBuf::from("login-state.json"),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = base_config();
        assert!(config.validate().is_ok());

        config.login_url = Some("ftp://example.com".to_string());
        assert!(config.validate().is_err());

        config.login_url = Some("not a url".to_string());
        assert!(config.validate().is_err());

        config.login_url = None;
        assert!(config.validate().is_ok());

        config.http_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.http_timeout_secs = 30;
        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_captcha_flag_parsing() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("CAPTCHA_ENABLED", "TRUE");
        }
        assert!(Config::from_env().captcha_enabled);

        unsafe {
            env::set_var("CAPTCHA_ENABLED", "0");
        }
        assert!(!Config::from_env().captcha_enabled);

        unsafe {
            env::remove_var("CAPTCHA_ENABLED");
        }
        assert!(!Config::from_env().captcha_enabled);
    }

    #[test]
    #[serial]
    fn test_timeout_defaults_and_overrides() {
        // SAFETY: Tests are run serially
        unsafe {
            env::remove_var("HTTP_TIMEOUT_SECS");
        }
        assert_eq!(Config::from_env().http_timeout_secs, 30);

        unsafe {
            env::set_var("HTTP_TIMEOUT_SECS", "5");
        }
        assert_eq!(Config::from_env().http_timeout_secs, 5);

        // Garbage falls back to the default
        unsafe {
            env::set_var("HTTP_TIMEOUT_SECS", "soon");
        }
        assert_eq!(Config::from_env().http_timeout_secs, 30);

        unsafe {
            env::remove_var("HTTP_TIMEOUT_SECS");
        }
    }

    #[test]
    #[serial]
    fn test_empty_login_url_treated_as_unset() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("LOGIN_URL", "");
        }
        assert_eq!(Config::from_env().login_url, None);

        unsafe {
            env::remove_var("LOGIN_URL");
        }
    }
}
