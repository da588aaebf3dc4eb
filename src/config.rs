use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const DEFAULT_MODEL: &str = "text-davinci-003";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024;

// Values that show up in sample .env files and mean "not set".
const PLACEHOLDER_KEYS: &[&str] = &[
    "dummy_key_until_configured",
    "your_openai_api_key",
    "your-api-key",
    "changeme",
];

/// Settings for the completion provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ProviderConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.map(|key| key.trim().to_string()),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// True when an API key is present and is not blank or a known placeholder.
    pub fn is_configured(&self) -> bool {
        match self.api_key.as_deref() {
            None | Some("") => false,
            Some(key) => !PLACEHOLDER_KEYS.contains(&key.to_lowercase().as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub provider: ProviderConfig,
    pub max_upload_bytes: usize,
    pub cors_allowed_origin: Option<String>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, applying defaults for
    /// everything except the API key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or(&lookup, "PORT", 8080u16)?;
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

        let provider = ProviderConfig {
            api_key: lookup("OPENAI_API_KEY").map(|key| key.trim().to_string()),
            model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: lookup("OPENAI_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            max_tokens: parse_or(&lookup, "OPENAI_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            temperature: parse_or(&lookup, "OPENAI_TEMPERATURE", DEFAULT_TEMPERATURE)?,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(AppError::Config(format!("Invalid LOG_FORMAT: {}", other)));
            }
        };

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            provider,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN").filter(|o| !o.trim().is_empty()),
            log_format,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::Config(format!("Invalid {}: {}", key, e))),
        None => Ok(default),
    }
}
