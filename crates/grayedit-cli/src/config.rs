//! Optional YAML configuration.
//!
//! ```yaml
//! limits:
//!   max_dimension: 2048
//!   max_layers: 4
//! filter: nearest
//! quality: 85
//! ```
//!
//! Command-line flags take precedence over every value here.

use anyhow::{Context, Result};
use grayedit_core::Limits;
use grayedit_ops::Filter;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Settings shared by all commands.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Size and layer limits.
    pub limits: Limits,
    /// Default resize filter name.
    pub filter: Option<String>,
    /// Default JPEG quality.
    pub quality: Option<u8>,
}

impl Config {
    /// Reads `path`, or returns defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        debug!(?config, "config loaded");
        Ok(config)
    }

    /// Parses YAML text.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Resize filter: the flag, else the configured default, else bilinear.
    pub fn filter(&self, flag: Option<&str>) -> Result<Filter> {
        match flag.or(self.filter.as_deref()) {
            Some(name) => Ok(name.parse()?),
            None => Ok(Filter::default()),
        }
    }

    /// JPEG quality: the flag, else the configured default.
    pub fn quality(&self, flag: Option<u8>) -> Option<u8> {
        flag.or(self.quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config = Config::parse("limits:\n  max_dimension: 512\nquality: 70\n").unwrap();
        assert_eq!(config.limits.max_dimension, 512);
        assert_eq!(config.limits.max_layers, grayedit_core::DEFAULT_MAX_LAYERS);
        assert_eq!(config.quality(None), Some(70));
        assert_eq!(config.quality(Some(95)), Some(95));
    }

    #[test]
    fn test_flag_overrides_filter() {
        let config = Config::parse("filter: nearest").unwrap();
        assert_eq!(config.filter(None).unwrap(), Filter::Nearest);
        assert_eq!(config.filter(Some("bilinear")).unwrap(), Filter::Bilinear);
        assert_eq!(Config::default().filter(None).unwrap(), Filter::Bilinear);
        assert!(config.filter(Some("cubic")).is_err());
    }

    #[test]
    fn test_empty_file() {
        let config = Config::parse("  \n").unwrap();
        assert_eq!(config.limits, Limits::default());
        assert!(Config::load(None).unwrap().quality.is_none());
    }
}
