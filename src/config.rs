//! Generator configuration loaded from TOML
//!
//! ```toml
//! [memegen]
//! base_url = "https://api.memegen.link"
//! format = "png"
//!
//! [fallback]
//! fixed_id = "drake"
//! pool = "popular"
//! popular = ["drake", "doge"]
//! ```
//!
//! Every table and key is optional; missing values keep their defaults.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::encoder::EncoderConfig;
use crate::template::{FallbackPolicy, FallbackPool};

/// Errors that can occur when loading or validating a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Image service base URL must start with http:// or https://: {0}")]
    InvalidBaseUrl(String),
    #[error("Invalid image format '{0}'")]
    InvalidFormat(String),
    #[error("Fallback pool is 'popular' but no popular templates are listed")]
    EmptyPopularPool,
}

/// Configuration for meme generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Image service and format
    pub encoder: EncoderConfig,
    /// What to do with unknown template ids
    pub fallback: FallbackPolicy,
}

/// TOML structure for deserializing configurations
#[derive(Deserialize)]
struct TomlConfig {
    memegen: Option<TomlMemegen>,
    fallback: Option<TomlFallback>,
}

#[derive(Deserialize)]
struct TomlMemegen {
    base_url: Option<String>,
    format: Option<String>,
}

#[derive(Deserialize)]
struct TomlFallback {
    fixed_id: Option<String>,
    pool: Option<FallbackPool>,
    popular: Option<Vec<String>>,
}

impl GeneratorConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(memegen) = parsed.memegen {
            if let Some(base_url) = memegen.base_url {
                config.encoder.base_url = base_url;
            }
            if let Some(format) = memegen.format {
                config.encoder.format = format;
            }
        }

        if let Some(fallback) = parsed.fallback {
            // An empty string means "no fixed fallback"
            config.fallback.fixed_id = fallback.fixed_id.filter(|id| !id.trim().is_empty());
            if let Some(pool) = fallback.pool {
                config.fallback.pool = pool;
            }
            if let Some(popular) = fallback.popular {
                config.fallback.popular = popular;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the values a TOML file could have gotten wrong
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = &self.encoder.base_url;
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url.clone()));
        }

        let format = &self.encoder.format;
        if format.is_empty() || !format.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::InvalidFormat(format.clone()));
        }

        if self.fallback.fixed_id.is_none()
            && self.fallback.pool == FallbackPool::Popular
            && self.fallback.popular.is_empty()
        {
            return Err(ConfigError::EmptyPopularPool);
        }

        Ok(())
    }

    /// Set the encoder configuration
    pub fn with_encoder(mut self, encoder: EncoderConfig) -> Self {
        self.encoder = encoder;
        self
    }

    /// Set the fallback policy
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Override the image format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.encoder.format = format.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = GeneratorConfig::from_str("").expect("Should parse");
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.fallback.pool, FallbackPool::All);
        assert_eq!(config.fallback.fixed_id, None);
    }

    #[test]
    fn test_full_config() {
        let config = GeneratorConfig::from_str(
            r#"
            [memegen]
            base_url = "http://localhost:5000"
            format = "jpg"

            [fallback]
            fixed_id = "drake"
            pool = "popular"
            popular = ["drake", "doge"]
            "#,
        )
        .expect("Should parse");

        assert_eq!(config.encoder.base_url, "http://localhost:5000");
        assert_eq!(config.encoder.format, "jpg");
        assert_eq!(config.fallback.fixed_id.as_deref(), Some("drake"));
        assert_eq!(config.fallback.pool, FallbackPool::Popular);
        assert_eq!(config.fallback.popular, vec!["drake", "doge"]);
    }

    #[test]
    fn test_blank_fixed_id_is_unset() {
        let config = GeneratorConfig::from_str("[fallback]\nfixed_id = \"\"\n").expect("Should parse");
        assert_eq!(config.fallback.fixed_id, None);
    }

    #[test]
    fn test_unknown_pool_is_parse_error() {
        let result = GeneratorConfig::from_str("[fallback]\npool = \"trending\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_popular_pool_needs_ids() {
        let result = GeneratorConfig::from_str("[fallback]\npool = \"popular\"\n");
        assert!(matches!(result, Err(ConfigError::EmptyPopularPool)));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = GeneratorConfig::from_str("[memegen]\nbase_url = \"ftp://memes\"\n");
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_invalid_format() {
        let result = GeneratorConfig::from_str("[memegen]\nformat = \".png\"\n");
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn test_builder_pattern() {
        let config = GeneratorConfig::new()
            .with_fallback(FallbackPolicy::new().with_fixed_id("doge"))
            .with_format("gif");
        assert_eq!(config.encoder.format, "gif");
        assert_eq!(config.fallback.fixed_id.as_deref(), Some("doge"));
    }
}
