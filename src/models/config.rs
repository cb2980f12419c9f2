//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::SiteSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Target site settings
    #[serde(default)]
    pub site: SiteConfig,

    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Content output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// CSS selectors for the listing pages
    #[serde(default)]
    pub selectors: SiteSelectors,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.site.base_url)?;
        if base.cannot_be_a_base() {
            return Err(AppError::validation("site.base_url cannot be a base URL"));
        }
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.output.content_dir.as_os_str().is_empty() {
            return Err(AppError::validation("output.content_dir is empty"));
        }
        if self.output.file_name.trim().is_empty() || self.output.file_name.contains('/') {
            return Err(AppError::validation(
                "output.file_name must be a plain file name",
            ));
        }
        self.selectors.validate()
    }
}

/// Target site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Root URL of the catalog site
    #[serde(default = "defaults::base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
        }
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Referer header for HTTP requests
    #[serde(default = "defaults::referer")]
    pub referer: String,

    /// Delay after every request in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            referer: defaults::referer(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Content output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory holding one subdirectory per game
    #[serde(default = "defaults::content_dir")]
    pub content_dir: PathBuf,

    /// File written inside each game directory
    #[serde(default = "defaults::file_name")]
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            content_dir: defaults::content_dir(),
            file_name: defaults::file_name(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Site defaults
    pub fn base_url() -> String {
        "https://backloggd.com".into()
    }

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36"
            .into()
    }
    pub fn referer() -> String {
        "https://backloggd.com/".into()
    }
    pub fn request_delay() -> u64 {
        1500
    }

    // Output defaults
    pub fn content_dir() -> PathBuf {
        PathBuf::from("content/games")
    }
    pub fn file_name() -> String {
        "index.md".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.site.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [crawler]
            request_delay_ms = 0

            [output]
            content_dir = "site/content/games"

            [selectors]
            entry_selector = ".card"
            "#,
        )
        .unwrap();

        assert_eq!(config.crawler.request_delay_ms, 0);
        assert_eq!(config.crawler.referer, "https://backloggd.com/");
        assert_eq!(config.output.content_dir, PathBuf::from("site/content/games"));
        assert_eq!(config.output.file_name, "index.md");
        assert_eq!(config.selectors.entry_selector, ".card");
        assert_eq!(config.selectors.entry_fallback_selector, ".game-cover");
        assert_eq!(config.site.base_url, "https://backloggd.com");
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let config = Config::load_or_default("/nonexistent/backlogger.toml");
        assert_eq!(config.crawler.request_delay_ms, 1500);
    }
}
