//! cssfx configuration file handling
//!
//! An optional `cssfx.toml` in the working directory tunes the animation and
//! the code output:
//!
//! ```toml
//! [animation]
//! save_delay_ms = 100
//! default_duration = 1000.0
//! gpu_compositing = true
//!
//! [output]
//! highlight = false
//! ```

use anyhow::{Context, Result};
use cssfx_animation::AnimationConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "cssfx.toml";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CssfxConfig {
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Code output settings
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Emit HTML-highlighted code instead of plain CSS
    #[serde(default)]
    pub highlight: bool,
}

impl CssfxConfig {
    /// Load `path`, or the default file if none is given
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None if Path::new(CONFIG_FILE).exists() => Self::load_from_file(Path::new(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CssfxConfig::parse("").unwrap();
        assert_eq!(config.animation, AnimationConfig::default());
        assert!(!config.output.highlight);
    }

    #[test]
    fn test_partial_config() {
        let config = CssfxConfig::parse(
            r#"
            [animation]
            save_delay_ms = 20

            [output]
            highlight = true
            "#,
        )
        .unwrap();

        assert_eq!(config.animation.save_delay_ms, 20);
        assert_eq!(config.animation.default_duration, 1000.0);
        assert!(config.output.highlight);
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = CssfxConfig::default();
        config.animation.gpu_compositing = false;

        let parsed = CssfxConfig::parse(&config.to_toml().unwrap()).unwrap();
        assert!(!parsed.animation.gpu_compositing);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(CssfxConfig::load(Some(Path::new("does/not/exist.toml"))).is_err());
    }
}
