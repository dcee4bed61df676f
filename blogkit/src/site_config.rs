//! Site configuration from blogkit.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::rich_text::DEFAULT_WORDS_PER_MINUTE;

/// Environment variable that overrides the configured revalidation secret
pub const REVALIDATION_SECRET_ENV: &str = "REVALIDATION_SECRET";

/// Site-wide settings passed explicitly to page, schema and sitemap builders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute base URL without trailing slash
    pub base_url: String,

    /// Human-readable site name
    pub site_name: String,

    /// Default site description
    pub description: String,

    /// BCP 47 content language (e.g., "id-ID")
    pub language: String,

    /// Default author of listing pages
    pub author: Author,

    /// Publishing organization
    pub publisher: Publisher,

    /// Social profile URLs of the organization
    pub same_as: Vec<String>,

    /// Articles per listing page
    pub page_size: u64,

    /// Reading speed used for reading time estimates
    pub words_per_minute: u64,

    /// Shared secret expected by the revalidation webhook
    pub revalidation_secret: Option<String>,
}

/// Author information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Author's display name
    pub name: String,

    /// Author's profile page
    pub url: Option<String>,
}

/// Publisher information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    /// Organization name
    pub name: String,

    /// Absolute URL of the organization logo
    pub logo: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://archipelago.web.id".to_string(),
            site_name: "Kata Komunikasi".to_string(),
            description: "Dapatkan artikel, wawasan, dan tips komunikasi dan informasi teknologi."
                .to_string(),
            language: "id-ID".to_string(),
            author: Author {
                name: "Kata Komunikasi".to_string(),
                url: Some("https://archipelago.web.id/about".to_string()),
            },
            publisher: Publisher {
                name: "Kata Komunikasi".to_string(),
                logo: "https://archipelago.web.id/logo.webp".to_string(),
            },
            same_as: vec![
                "https://twitter.com/katakomunikasi".to_string(),
                "https://facebook.com/katakomunikasi".to_string(),
                "https://linkedin.com/company/kata-komunikasi".to_string(),
                "https://instagram.com/katakomunikasi".to_string(),
                "https://youtube.com/@katakomunikasi".to_string(),
            ],
            page_size: 6,
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            revalidation_secret: None,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a blogkit.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(SiteConfig)` - Successfully loaded configuration; absent keys take defaults
    /// * `Err(ConfigError)` - Error reading or parsing the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path)?;
        let config: SiteConfig = toml::from_str(&content)?;
        Ok(config.normalized())
    }

    /// Load configuration, falling back to defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            log::info!(
                "No configuration at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// Save configuration to a blogkit.toml file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Apply environment overrides
    ///
    /// A non-empty `REVALIDATION_SECRET` replaces the configured secret.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(secret) = std::env::var(REVALIDATION_SECRET_ENV) {
            if !secret.is_empty() {
                self.revalidation_secret = Some(secret);
            }
        }
        self
    }

    /// Canonical URL of an article page
    ///
    /// Slugs are always page paths, even ones that look like URLs.
    pub fn article_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url, slug)
    }

    /// Resolve a site-relative path against the base URL
    ///
    /// Absolute `http(s)` URLs are returned unchanged.
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn normalized(mut self) -> Self {
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        self.page_size = self.page_size.max(1);
        self.words_per_minute = self.words_per_minute.max(1);
        self
    }
}

/// Errors that can occur when loading or saving site configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error when reading or writing the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing TOML
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Error serializing to TOML
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
