//! Configuration module for the contact relay.

use chrono_tz::Tz;
use serde::Deserialize;
use std::path::Path;

use crate::datetime::{is_valid_format, DEFAULT_FORMAT};
use crate::{ContactRelayError, Result};

/// Web server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Accepted submissions per client within `submit_rate_window_secs`.
    #[serde(default = "default_submit_rate_limit")]
    pub submit_rate_limit: u32,
    /// Window for the submit rate limit, in seconds.
    #[serde(default = "default_submit_rate_window")]
    pub submit_rate_window_secs: u64,
    /// Requests per client within `api_rate_window_secs` for every other route.
    #[serde(default = "default_api_rate_limit")]
    pub api_rate_limit: u32,
    /// Window for the default rate limit, in seconds.
    #[serde(default = "default_api_rate_window")]
    pub api_rate_window_secs: u64,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    3000
}

fn default_submit_rate_limit() -> u32 {
    5
}

fn default_submit_rate_window() -> u64 {
    3600 // 1 hour
}

fn default_api_rate_limit() -> u32 {
    10
}

fn default_api_rate_window() -> u64 {
    60
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            cors_origins: vec![],
            submit_rate_limit: default_submit_rate_limit(),
            submit_rate_window_secs: default_submit_rate_window(),
            api_rate_limit: default_api_rate_limit(),
            api_rate_window_secs: default_api_rate_window(),
        }
    }
}

/// SMTP relay configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    #[serde(default = "default_smtp_host")]
    pub host: String,
    /// SMTP server port.
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Use implicit TLS instead of STARTTLS (port 465 style).
    #[serde(default)]
    pub implicit_tls: bool,
    /// Account used to authenticate against the relay.
    #[serde(default)]
    pub username: String,
    /// Account secret (app password).
    #[serde(default)]
    pub password: String,
    /// Transport timeout in seconds.
    #[serde(default = "default_smtp_timeout")]
    pub timeout_secs: u64,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_timeout() -> u64 {
    30
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            implicit_tls: false,
            username: String::new(),
            password: String::new(),
            timeout_secs: default_smtp_timeout(),
        }
    }
}

/// Contact form configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactConfig {
    /// Mailbox that receives every application.
    #[serde(default)]
    pub admin_email: String,
    /// Site name shown in the message title.
    #[serde(default = "default_site_name")]
    pub site_name: String,
    /// Timezone for the submission timestamp (e.g., "Europe/Moscow", "UTC").
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// chrono format string for the submission timestamp.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_site_name() -> String {
    "MOUN Digital Agency".to_string()
}

fn default_timezone() -> String {
    "Europe/Moscow".to_string()
}

fn default_timestamp_format() -> String {
    DEFAULT_FORMAT.to_string()
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            admin_email: String::new(),
            site_name: default_site_name(),
            timezone: default_timezone(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/contact-relay.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Web server configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// SMTP relay configuration.
    #[serde(default)]
    pub smtp: SmtpConfig,
    /// Contact form configuration.
    #[serde(default)]
    pub contact: ContactConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ContactRelayError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ContactRelayError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `EMAIL_USER`: SMTP account username
    /// - `EMAIL_PASS`: SMTP account password
    /// - `ADMIN_EMAIL`: Recipient of contact applications
    /// - `SMTP_HOST`: SMTP relay hostname
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides(&mut self) {
        let overrides: [(&str, &mut String); 4] = [
            ("EMAIL_USER", &mut self.smtp.username),
            ("EMAIL_PASS", &mut self.smtp.password),
            ("ADMIN_EMAIL", &mut self.contact.admin_email),
            ("SMTP_HOST", &mut self.smtp.host),
        ];

        for (name, target) in overrides {
            if let Ok(value) = std::env::var(name) {
                if !value.is_empty() {
                    *target = value;
                }
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The admin address or SMTP credentials are missing
    /// - A rate limit or its window is zero
    /// - The timezone is unknown
    /// - The timestamp format contains an unknown specifier
    pub fn validate(&self) -> Result<()> {
        if self.contact.admin_email.trim().is_empty() {
            return Err(ContactRelayError::Config(
                "admin_email is not set. \
                 Set it in config.toml or via ADMIN_EMAIL environment variable."
                    .to_string(),
            ));
        }
        if self.smtp.username.is_empty() || self.smtp.password.is_empty() {
            return Err(ContactRelayError::Config(
                "SMTP credentials are not set. \
                 Set them in config.toml or via EMAIL_USER / EMAIL_PASS environment variables."
                    .to_string(),
            ));
        }
        if self.web.submit_rate_limit == 0 || self.web.submit_rate_window_secs == 0 {
            return Err(ContactRelayError::Config(
                "submit rate limit and window must be greater than zero".to_string(),
            ));
        }
        if self.web.api_rate_limit == 0 || self.web.api_rate_window_secs == 0 {
            return Err(ContactRelayError::Config(
                "api rate limit and window must be greater than zero".to_string(),
            ));
        }
        if self.contact.timezone.parse::<Tz>().is_err() {
            return Err(ContactRelayError::Config(format!(
                "unknown timezone: {}",
                self.contact.timezone
            )));
        }
        if !is_valid_format(&self.contact.timestamp_format) {
            return Err(ContactRelayError::Config(format!(
                "invalid timestamp_format: {}",
                self.contact.timestamp_format
            )));
        }
        Ok(())
    }
}
