//! Site configuration module.
//!
//! Loads and validates `config.toml`. The file lives in the site root (the
//! directory the tool is run from) and is optional: stock defaults match the
//! conventional layout.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! notices_dir = "notices"     # Notice tree (notices/<id>/<lang>/...)
//! locales_dir = "locales"     # UI strings, one <lang>.json per language
//! assets_dir = "assets"       # Copied verbatim into the output
//! output_dir = "dist"         # Generated site
//! default_language = "it"     # Language of the home page and string fallback
//!
//! [site]
//! title = "Privacy Center"
//!
//! [build]
//! command = []                # Empty = built-in generator
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [build]
//! command = ["npx", "@11ty/eleventy"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Notice tree, relative to the site root.
    pub notices_dir: String,
    /// Locale string tables, relative to the site root.
    pub locales_dir: String,
    /// Static assets copied into the output, relative to the site root.
    pub assets_dir: String,
    /// Generated site, relative to the site root.
    pub output_dir: String,
    /// Home page language and fallback for missing string tables.
    pub default_language: String,
    pub site: SiteInfo,
    pub build: BuildConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            notices_dir: "notices".to_string(),
            locales_dir: "locales".to_string(),
            assets_dir: "assets".to_string(),
            output_dir: "dist".to_string(),
            default_language: "it".to_string(),
            site: SiteInfo::default(),
            build: BuildConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "default_language must not be empty".into(),
            ));
        }
        for (key, value) in [
            ("notices_dir", &self.notices_dir),
            ("locales_dir", &self.locales_dir),
            ("output_dir", &self.output_dir),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if let Some(program) = self.build.command.first()
            && program.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "build.command program must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn notices_path(&self, root: &Path) -> PathBuf {
        root.join(&self.notices_dir)
    }

    pub fn locales_path(&self, root: &Path) -> PathBuf {
        root.join(&self.locales_dir)
    }

    pub fn assets_path(&self, root: &Path) -> PathBuf {
        root.join(&self.assets_dir)
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_dir)
    }
}

/// Site-wide presentation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Title used when the locale table has no `privacyCenter` string.
    pub title: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Privacy Center".to_string(),
        }
    }
}

/// Site-build step settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// External build command, program first. Empty uses the built-in generator.
    pub command: Vec<String>,
}

// =============================================================================
// Loading
// =============================================================================

/// Parse config text. Missing keys take their defaults; unknown keys are
/// an error.
pub fn parse_config(text: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Load `config.toml` from the site root, or the defaults when there is none.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(SiteConfig::default());
    }
    parse_config(&fs::read_to_string(&path)?)
}
