//! Process configuration, read from the environment (and `.env` when present).

use std::env;
use std::str::FromStr;

use crate::{Result, StorefrontError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(StorefrontError::Config(format!("Invalid LOG_FORMAT: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    /// ISO 4217 code used when a snapshot carries no currency.
    pub default_currency: String,
    /// Upper bound on the quantity of a single cart line or availability check.
    pub max_line_quantity: u32,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8083,
            default_currency: "USD".to_string(),
            max_line_quantity: 99,
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server_host = lookup("SERVER_HOST").unwrap_or(defaults.server_host);
        let server_port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| StorefrontError::Config(format!("Invalid PORT: {e}")))?,
            None => defaults.server_port,
        };
        let default_currency = match lookup("DEFAULT_CURRENCY") {
            Some(raw) => parse_currency(&raw)?,
            None => defaults.default_currency,
        };
        let max_line_quantity = match lookup("MAX_LINE_QUANTITY") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(0) => return Err(StorefrontError::Config("MAX_LINE_QUANTITY must be at least 1".to_string())),
                Ok(n) => n,
                Err(e) => return Err(StorefrontError::Config(format!("Invalid MAX_LINE_QUANTITY: {e}"))),
            },
            None => defaults.max_line_quantity,
        };
        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => defaults.log_format,
        };

        Ok(Self { server_host, server_port, default_currency, max_line_quantity, log_format })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_currency(raw: &str) -> Result<String> {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code)
    } else {
        Err(StorefrontError::Config(format!("Invalid DEFAULT_CURRENCY: {raw}")))
    }
}
