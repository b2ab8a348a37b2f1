//! Application configuration loading from environment variables.
//!
//! All configuration is loaded once at startup and handed to the router through
//! `AppState`. Nothing reads the environment after that point.
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `PORT`: Server port
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,vision_relay=debug,tower_http=debug")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `AZURE_CUSTOM_VISION_ENDPOINT`: Prediction endpoint of the Custom Vision project
//! - `AZURE_CUSTOM_VISION_KEY`: Prediction key sent with every classification call
//! - `CORS_ALLOWED_ORIGIN`: The single browser origin allowed to call the API
//!   (default: "http://localhost:5173")
//! - `MAX_UPLOAD_BYTES`: Largest accepted image (default: 5 MiB)
//! - `CLASSIFY_TIMEOUT_SECONDS`: Upper bound on one outbound call (default: 30)
//!
//! The two Azure variables are optional at startup: without them the server still
//! boots, and every classification request answers with a configuration error.

use http::HeaderValue;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_CLASSIFY_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Complete server configuration loaded from environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Custom Vision prediction URL (image/octet-stream variant)
    pub custom_vision_endpoint: Option<String>,

    /// Custom Vision prediction key
    pub custom_vision_key: Option<String>,

    /// Origin allowed by the CORS policy
    pub allowed_origin: String,

    /// Maximum accepted image size in bytes
    pub max_upload_bytes: usize,

    /// Timeout applied to each outbound classification call, in seconds
    pub classify_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is missing, or if any variable is set but
    /// cannot be parsed to the expected type.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// `from_env` is this function applied to the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            host: env_or(&lookup, "HOST", "0.0.0.0".to_string())?,
            port: env_required(&lookup, "PORT")?
                .parse()
                .map_err(|e| anyhow::anyhow!("Failed to parse PORT: {}", e))?,
            custom_vision_endpoint: env_optional(&lookup, "AZURE_CUSTOM_VISION_ENDPOINT"),
            custom_vision_key: env_optional(&lookup, "AZURE_CUSTOM_VISION_KEY"),
            allowed_origin: env_or(
                &lookup,
                "CORS_ALLOWED_ORIGIN",
                DEFAULT_ALLOWED_ORIGIN.to_string(),
            )?,
            max_upload_bytes: env_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            classify_timeout_seconds: env_or(
                &lookup,
                "CLASSIFY_TIMEOUT_SECONDS",
                DEFAULT_CLASSIFY_TIMEOUT_SECONDS,
            )?,
        };

        if HeaderValue::from_str(&config.allowed_origin).is_err() {
            anyhow::bail!(
                "CORS_ALLOWED_ORIGIN is not a valid header value: {}",
                config.allowed_origin
            );
        }
        if config.classify_timeout_seconds == 0 {
            anyhow::bail!("CLASSIFY_TIMEOUT_SECONDS must be greater than zero");
        }

        Ok(config)
    }

    /// True when both Custom Vision credentials are present.
    pub fn classifier_configured(&self) -> bool {
        self.custom_vision_endpoint.is_some() && self.custom_vision_key.is_some()
    }

    pub fn classify_timeout(&self) -> Duration {
        Duration::from_secs(self.classify_timeout_seconds)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load a required environment variable.
///
/// # Errors
///
/// Returns an error if the variable is not set or blank.
fn env_required<F>(lookup: &F, key: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    env_optional(lookup, key)
        .ok_or_else(|| anyhow::anyhow!("Missing required environment variable: {}", key))
}

/// Load an optional variable, treating blank values as unset.
fn env_optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Load an environment variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env_optional(lookup, key) {
        Some(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        None => Ok(default),
    }
}
