//! Configuration for the FormBridge server
//!
//! Values come from the environment; `main` loads an optional `.env` file
//! first.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use formbridge_core::application::notifications::{DEFAULT_QR_SERVICE_URL, DEFAULT_QR_SIZE};
use formbridge_core::QrCodeService;

use crate::error::{ServerError, ServerResult};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, multi-line
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ServerError::ConfigError(format!("Invalid LOG_FORMAT value: {}", other))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Server configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub bind_address: String,

    /// Base URL of the table store
    pub table_store_url: String,

    /// Base URL of the hosted platform API
    pub host_api_url: String,

    /// Bearer token for the hosted platform API
    #[serde(default)]
    pub host_api_token: Option<String>,

    /// Timeout for outgoing HTTP calls
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// QR rendering base URL
    #[serde(default = "default_qr_service_url")]
    pub qr_service_url: String,

    /// QR image edge in pixels
    #[serde(default = "default_qr_size")]
    pub qr_size: u32,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format
    #[serde(default)]
    pub log_format: LogFormat,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("bind_address", &self.bind_address)
            .field("table_store_url", &self.table_store_url)
            .field("host_api_url", &self.host_api_url)
            .field("host_api_token", &self.host_api_token.as_ref().map(|_| REDACTED))
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("qr_service_url", &self.qr_service_url)
            .field("qr_size", &self.qr_size)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}

/// Stand-in printed for secrets
pub(crate) const REDACTED: &str = "[redacted]";

fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_qr_service_url() -> String {
    DEFAULT_QR_SERVICE_URL.to_string()
}

fn default_qr_size() -> u32 {
    DEFAULT_QR_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_host(),
            table_store_url: String::new(),
            host_api_url: String::new(),
            host_api_token: None,
            http_timeout_secs: default_http_timeout_secs(),
            qr_service_url: default_qr_service_url(),
            qr_size: default_qr_size(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn load() -> ServerResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ServerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("SERVER_PORT") {
            config.port = parse_var("SERVER_PORT", &port)?;
        }
        if let Some(host) = lookup("SERVER_HOST") {
            config.bind_address = host;
        }
        if let Some(url) = lookup("TABLE_STORE_URL") {
            config.table_store_url = url;
        }
        if let Some(url) = lookup("HOST_API_URL") {
            config.host_api_url = url;
        }
        config.host_api_token = lookup("HOST_API_TOKEN").filter(|token| !token.is_empty());
        if let Some(timeout) = lookup("HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = parse_var("HTTP_TIMEOUT_SECS", &timeout)?;
        }
        if let Some(url) = lookup("QR_SERVICE_URL") {
            config.qr_service_url = url;
        }
        if let Some(size) = lookup("QR_SIZE") {
            config.qr_size = parse_var("QR_SIZE", &size)?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            config.log_format = format.parse()?;
        }

        if config.table_store_url.trim().is_empty() {
            return Err(ServerError::ConfigError("TABLE_STORE_URL is required".to_string()));
        }
        if config.host_api_url.trim().is_empty() {
            return Err(ServerError::ConfigError("HOST_API_URL is required".to_string()));
        }

        Ok(config)
    }

    /// Timeout applied to the HTTP clients
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// QR service described by this configuration
    pub fn qr_service(&self) -> QrCodeService {
        QrCodeService::new(self.qr_service_url.clone(), self.qr_size)
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> ServerResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ServerError::ConfigError(format!("Invalid {} value: {}", name, value)))
}
