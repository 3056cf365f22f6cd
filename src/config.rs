//! Loader configuration.
//!
//! Handles loading, validating, and merging `content.toml`. Stock defaults
//! are overridden by whatever the user's file specifies; the file itself is
//! optional.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "content"          # Directory the paths below are relative to
//! site_url = "https://www.example.com"
//!
//! [paths]
//! homepage = "pages/home.yml"
//! about = "pages/about.yml"
//! settings = "settings/general.yml"
//! services = "services"
//! case_studies = "case-studies"
//! insights = "insights"
//! personas = "personas"
//! resources = "resources"
//!
//! [loading]
//! strict_parse_errors = false       # Make parse errors fatal for check/build
//!
//! [defaults]
//! order = 999                       # Sort position when none is given
//! words_per_minute = 200            # For computed insight read times
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [paths]
//! insights = "blog"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::ContentKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Loader configuration loaded from `content.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Root directory that every content path is relative to.
    pub content_root: PathBuf,
    /// Public site URL, used for absolute links in structured data.
    pub site_url: String,
    /// Content locations, relative to `content_root`.
    pub paths: PathsConfig,
    /// Failure policy.
    pub loading: LoadingConfig,
    /// Inline defaults applied during assembly.
    pub defaults: DefaultsConfig,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("content"),
            site_url: "https://www.example.com".to_string(),
            paths: PathsConfig::default(),
            loading: LoadingConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl ContentConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_root.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "content_root must not be empty".into(),
            ));
        }
        if !(self.site_url.starts_with("http://") || self.site_url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "site_url must start with http:// or https://".into(),
            ));
        }
        for kind in ContentKind::ALL {
            if self.paths.relative(kind).as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "paths.{} must not be empty",
                    PathsConfig::key(kind)
                )));
            }
        }
        if self.defaults.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "defaults.words_per_minute must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Absolute (root-joined) location of a content kind's file or directory.
    pub fn path_for(&self, kind: ContentKind) -> PathBuf {
        self.content_root.join(self.paths.relative(kind))
    }
}

/// Where each content kind lives, relative to the content root.
///
/// Single-file kinds point at a YAML file; collection kinds at a directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub homepage: PathBuf,
    pub about: PathBuf,
    pub settings: PathBuf,
    pub services: PathBuf,
    pub case_studies: PathBuf,
    pub insights: PathBuf,
    pub personas: PathBuf,
    pub resources: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            homepage: PathBuf::from("pages/home.yml"),
            about: PathBuf::from("pages/about.yml"),
            settings: PathBuf::from("settings/general.yml"),
            services: PathBuf::from("services"),
            case_studies: PathBuf::from("case-studies"),
            insights: PathBuf::from("insights"),
            personas: PathBuf::from("personas"),
            resources: PathBuf::from("resources"),
        }
    }
}

impl PathsConfig {
    pub fn relative(&self, kind: ContentKind) -> &Path {
        match kind {
            ContentKind::Homepage => &self.homepage,
            ContentKind::About => &self.about,
            ContentKind::Settings => &self.settings,
            ContentKind::Service => &self.services,
            ContentKind::CaseStudy => &self.case_studies,
            ContentKind::Insight => &self.insights,
            ContentKind::Persona => &self.personas,
            ContentKind::Resource => &self.resources,
        }
    }

    /// The `[paths]` key for a kind, for error messages.
    fn key(kind: ContentKind) -> &'static str {
        match kind {
            ContentKind::Homepage => "homepage",
            ContentKind::About => "about",
            ContentKind::Settings => "settings",
            ContentKind::Service => "services",
            ContentKind::CaseStudy => "case_studies",
            ContentKind::Insight => "insights",
            ContentKind::Persona => "personas",
            ContentKind::Resource => "resources",
        }
    }
}

/// How the CLI treats content that fails to parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadingConfig {
    /// When true, `check` and `build` exit with an error if any file failed
    /// to parse or read. The library itself always falls back.
    pub strict_parse_errors: bool,
}

/// Inline defaults used while coalescing raw fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Sort position for items with neither an `order` key nor a numeric
    /// file-name prefix.
    pub order: u32,
    /// Reading speed for computed insight read times.
    pub words_per_minute: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            order: 999,
            words_per_minute: 200,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ContentConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<ContentConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ContentConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `content.toml` from `path`, falling back to stock defaults if absent.
///
/// A relative `content_root` is resolved against the config file's directory.
pub fn load_config(path: &Path) -> Result<ContentConfig, ConfigError> {
    let mut config = resolve_config(load_raw_config(path)?)?;
    if config.content_root.is_relative()
        && let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
    {
        config.content_root = parent.join(&config.content_root);
    }
    Ok(config)
}

/// Returns a fully-commented stock `content.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site Content Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Directory that all content paths below are relative to.
# A relative path is resolved against the directory holding this file.
content_root = "content"

# Public URL of the site, used for absolute links in structured data.
# Can be overridden with the SITE_URL environment variable.
site_url = "https://www.example.com"

# ---------------------------------------------------------------------------
# Content locations
# ---------------------------------------------------------------------------
[paths]
# Single YAML documents.
homepage = "pages/home.yml"
about = "pages/about.yml"
settings = "settings/general.yml"

# Directories with one markdown (front-matter) or YAML file per item.
services = "services"
case_studies = "case-studies"
insights = "insights"
personas = "personas"
resources = "resources"

# ---------------------------------------------------------------------------
# Failure policy
# ---------------------------------------------------------------------------
[loading]
# Missing or invalid content always falls back to built-in defaults.
# Set to true to make `check` and `build` fail when a file could not be
# parsed, since that usually means a broken CMS commit.
strict_parse_errors = false

# ---------------------------------------------------------------------------
# Inline defaults
# ---------------------------------------------------------------------------
[defaults]
# Sort position for items with no `order` key and no NNN- file prefix.
order = 999

# Reading speed used to compute insight read times.
words_per_minute = 200
"##
}
