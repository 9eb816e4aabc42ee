//! Storefront configuration (`storefront.toml`).
//!
//! Every section and field is optional:
//!
//! ```toml
//! [catalog]
//! path = "catalog.json"
//!
//! [content]
//! root = "content"
//! failure = "degrade"        # or "not-found"
//!
//! [pages]
//! revalidate_secs = 1
//! fallback = "placeholder"   # or "blocking"
//! buffer_size = 32
//!
//! [cart]
//! add_timeout_secs = 10      # unset: a pending add never expires
//! ```
//!
//! Relative paths are resolved against the directory of the config file.

use crate::page::ContentFailurePolicy;
use page_framework::{FallbackMode, PageActorConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_FILE: &str = "storefront.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {0}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorefrontConfig {
    pub catalog: CatalogConfig,
    pub content: ContentConfig,
    pub pages: PagesConfig,
    pub cart: CartConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "catalog.json".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    pub root: PathBuf,
    pub failure: ContentFailurePolicy,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: "content".into(),
            failure: ContentFailurePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fallback {
    #[default]
    Placeholder,
    Blocking,
}

impl From<Fallback> for FallbackMode {
    fn from(fallback: Fallback) -> Self {
        match fallback {
            Fallback::Placeholder => FallbackMode::Placeholder,
            Fallback::Blocking => FallbackMode::Blocking,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    /// Seconds a built page stays fresh.
    pub revalidate_secs: u64,
    pub fallback: Fallback,
    pub buffer_size: usize,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            revalidate_secs: 1,
            fallback: Fallback::default(),
            buffer_size: 32,
        }
    }
}

impl PagesConfig {
    pub fn actor_config(&self) -> PageActorConfig {
        PageActorConfig {
            buffer_size: self.buffer_size,
            revalidate: Duration::from_secs(self.revalidate_secs),
            fallback: self.fallback.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CartConfig {
    pub add_timeout_secs: Option<u64>,
}

impl CartConfig {
    pub fn add_timeout(&self) -> Option<Duration> {
        self.add_timeout_secs.map(Duration::from_secs)
    }
}

impl StorefrontConfig {
    /// Reads, validates and anchors the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let mut config = Self::parse(&text)?;
        if let Some(dir) = path.parent() {
            config.anchor(dir);
        }
        Ok(config)
    }

    /// Parses and validates config text. Paths are left as written.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pages.buffer_size == 0 {
            return Err(ConfigError::Validation(
                "[pages] buffer_size must be greater than 0".into(),
            ));
        }
        if self.cart.add_timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "[cart] add_timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Resolves relative paths against `dir`.
    fn anchor(&mut self, dir: &Path) {
        if self.catalog.path.is_relative() {
            self.catalog.path = dir.join(&self.catalog.path);
        }
        if self.content.root.is_relative() {
            self.content.root = dir.join(&self.content.root);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = StorefrontConfig::parse("").unwrap();
        assert_eq!(config.catalog.path, PathBuf::from("catalog.json"));
        assert_eq!(config.content.failure, ContentFailurePolicy::Degrade);
        assert_eq!(config.pages.revalidate_secs, 1);
        assert_eq!(config.pages.buffer_size, 32);
        assert_eq!(config.cart.add_timeout(), None);

        let actor = config.pages.actor_config();
        assert_eq!(actor.revalidate, Duration::from_secs(1));
        assert_eq!(actor.fallback, FallbackMode::Placeholder);
    }

    #[test]
    fn test_full_config() {
        let config = StorefrontConfig::parse(
            r#"
            [catalog]
            path = "data/products.json"

            [content]
            root = "docs"
            failure = "not-found"

            [pages]
            revalidate_secs = 60
            fallback = "blocking"
            buffer_size = 8

            [cart]
            add_timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.content.failure, ContentFailurePolicy::NotFound);
        assert_eq!(config.pages.actor_config().fallback, FallbackMode::Blocking);
        assert_eq!(config.pages.actor_config().buffer_size, 8);
        assert_eq!(config.cart.add_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            StorefrontConfig::parse("[pages]\nbuffer_size = 0"),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            StorefrontConfig::parse("[cart]\nadd_timeout_secs = 0"),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            StorefrontConfig::parse("[pages]\nrevalidate = 1"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_load_anchors_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[content]\nroot = \"docs\"\n").unwrap();

        let config = StorefrontConfig::load(&path).unwrap();
        assert_eq!(config.content.root, dir.path().join("docs"));
        assert_eq!(config.catalog.path, dir.path().join("catalog.json"));
    }
}
