//! Environment configuration.

use miette::Diagnostic;
use thiserror::Error;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL the transport implementation talks to.
    pub api_base: String,
    /// Feed page size.
    pub page_size: usize,
}

impl Config {
    pub const DEFAULT_API_BASE: &'static str = "http://localhost:8080/api";
    pub const DEFAULT_PAGE_SIZE: usize = 6;

    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `QUILL_API_BASE`: transport base URL (default: `http://localhost:8080/api`)
    /// - `QUILL_PAGE_SIZE`: feed page size (default: 6, must be >= 1)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base = std::env::var("QUILL_API_BASE")
            .unwrap_or_else(|_| Self::DEFAULT_API_BASE.to_string());

        let page_size = match std::env::var("QUILL_PAGE_SIZE") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                field: "QUILL_PAGE_SIZE",
                message: format!("not an integer: {raw}"),
            })?,
            Err(_) => Self::DEFAULT_PAGE_SIZE,
        };
        if page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "QUILL_PAGE_SIZE",
                message: "page size must be at least 1".into(),
            });
        }

        Ok(Self {
            api_base,
            page_size,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: Self::DEFAULT_API_BASE.to_string(),
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("invalid configuration value for {field}: {message}")]
    #[diagnostic(code(quill::config::invalid))]
    Invalid { field: &'static str, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base, Config::DEFAULT_API_BASE);
        assert_eq!(config.page_size, 6);
    }
}
