//! Project configuration module.
//!
//! Handles loading, validating, and merging `mpa.toml`. A project without
//! the file gets the stock defaults, which match the conventional layout:
//!
//! ```text
//! project/
//! ├── mpa.toml                 # optional
//! └── src/
//!     ├── scripts/<page>/index.js
//!     └── pages/<page>/index.html
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [entries]
//! pattern = "./src/scripts/*/index.js"
//!
//! [pages]
//! pattern = "./src/pages/*/index.html"
//!
//! [assets]
//! build_sub_directory = "static"
//! dev_sub_directory = "static"
//!
//! [css]
//! source_map = false
//! use_postcss = true
//!
//! [notifier]
//! title = "mpa-config"
//! icon = "logo.png"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [assets]
//! build_sub_directory = "assets"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::assets::BuildMode;
use crate::loaders::LoaderOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Config filename looked up in the project root.
pub const CONFIG_FILE: &str = "mpa.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `mpa.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Script discovery.
    pub entries: EntriesConfig,
    /// HTML template discovery.
    pub pages: PagesConfig,
    /// Asset sub-directories per build mode.
    pub assets: AssetsConfig,
    /// Style loader flags.
    pub css: CssConfig,
    /// Build failure notifications.
    pub notifier: NotifierConfig,
}

impl ProjectConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entries.pattern.trim().is_empty() {
            return Err(ConfigError::Validation(
                "entries.pattern must not be empty".into(),
            ));
        }
        if self.pages.pattern.trim().is_empty() {
            return Err(ConfigError::Validation(
                "pages.pattern must not be empty".into(),
            ));
        }
        if glob::Pattern::new(&self.entries.pattern).is_err() {
            return Err(ConfigError::Validation(format!(
                "entries.pattern is not a valid glob: {}",
                self.entries.pattern
            )));
        }
        if glob::Pattern::new(&self.pages.pattern).is_err() {
            return Err(ConfigError::Validation(format!(
                "pages.pattern is not a valid glob: {}",
                self.pages.pattern
            )));
        }
        if self.assets.build_sub_directory.is_empty() || self.assets.dev_sub_directory.is_empty() {
            return Err(ConfigError::Validation(
                "assets sub-directories must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Loader flags for a build in `mode`. Production builds extract CSS.
    pub fn loader_options(&self, mode: BuildMode) -> LoaderOptions {
        LoaderOptions {
            source_map: self.css.source_map,
            use_postcss: self.css.use_postcss,
            extract: mode == BuildMode::Production,
        }
    }
}

/// Script discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntriesConfig {
    /// Glob matching one or more scripts per page directory.
    pub pattern: String,
}

impl Default for EntriesConfig {
    fn default() -> Self {
        Self {
            pattern: "./src/scripts/*/index.js".to_string(),
        }
    }
}

/// HTML template discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    /// Glob matching one template per page directory.
    pub pattern: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            pattern: "./src/pages/*/index.html".to_string(),
        }
    }
}

/// Where emitted assets go, relative to the output root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    pub build_sub_directory: String,
    pub dev_sub_directory: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            build_sub_directory: "static".to_string(),
            dev_sub_directory: "static".to_string(),
        }
    }
}

/// Style loader flags that don't depend on build mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CssConfig {
    pub source_map: bool,
    pub use_postcss: bool,
}

impl Default for CssConfig {
    fn default() -> Self {
        Self {
            source_map: false,
            use_postcss: true,
        }
    }
}

/// Desktop notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifierConfig {
    /// Notification title, usually the package name.
    pub title: String,
    /// Icon path shown with the notification.
    pub icon: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            title: env!("CARGO_PKG_NAME").to_string(),
            icon: "logo.png".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ProjectConfig::default())
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
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ProjectConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ProjectConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a specific file, falling back to defaults when it is absent.
pub fn load_config_file(config_path: &Path) -> Result<ProjectConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(config_path)?;
    if overlay.is_none() {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
    }
    resolve_config(base, overlay)
}

/// Load `mpa.toml` from the given project root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<ProjectConfig, ConfigError> {
    load_config_file(&root.join(CONFIG_FILE))
}

/// Returns a fully-commented stock `mpa.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# mpa-config Configuration
# ========================
#
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.

# ---------------------------------------------------------------------------
# Entry discovery
# ---------------------------------------------------------------------------
[entries]
# Scripts to bundle. Each file is named after the directory containing it,
# so ./src/scripts/admin/index.js becomes the "admin" entry. Several files in
# one directory are bundled together under that name.
pattern = "./src/scripts/*/index.js"

# ---------------------------------------------------------------------------
# Page discovery
# ---------------------------------------------------------------------------
[pages]
# HTML templates. ./src/pages/admin/index.html becomes admin.html and loads
# the manifest, vendor and admin chunks.
pattern = "./src/pages/*/index.html"

# ---------------------------------------------------------------------------
# Assets
# ---------------------------------------------------------------------------
[assets]
# Sub-directory of the output that holds emitted assets in production builds.
build_sub_directory = "static"

# Same, for development builds.
dev_sub_directory = "static"

# ---------------------------------------------------------------------------
# Stylesheets
# ---------------------------------------------------------------------------
[css]
# Emit source maps from every style loader.
source_map = false

# Run postcss-loader after css-loader.
use_postcss = true

# ---------------------------------------------------------------------------
# Build failure notifications
# ---------------------------------------------------------------------------
[notifier]
title = "mpa-config"
icon = "logo.png"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_patterns() {
        let config = ProjectConfig::default();
        assert_eq!(config.entries.pattern, "./src/scripts/*/index.js");
        assert_eq!(config.pages.pattern, "./src/pages/*/index.html");
    }

    #[test]
    fn default_config_has_assets_and_css() {
        let config = ProjectConfig::default();
        assert_eq!(config.assets.build_sub_directory, "static");
        assert_eq!(config.assets.dev_sub_directory, "static");
        assert!(!config.css.source_map);
        assert!(config.css.use_postcss);
    }

    #[test]
    fn default_notifier_title_is_package_name() {
        let config = ProjectConfig::default();
        assert_eq!(config.notifier.title, "mpa-config");
        assert_eq!(config.notifier.icon, "logo.png");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[assets]
build_sub_directory = "assets"
"#;
        let config: ProjectConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.assets.build_sub_directory, "assets");
        assert_eq!(config.assets.dev_sub_directory, "static");
        assert_eq!(config.entries.pattern, "./src/scripts/*/index.js");
    }

    #[test]
    fn loader_options_extract_in_production_only() {
        let config = ProjectConfig::default();
        assert!(config.loader_options(BuildMode::Production).extract);
        assert!(!config.loader_options(BuildMode::Development).extract);
        assert!(config.loader_options(BuildMode::Development).use_postcss);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.pages.pattern, "./src/pages/*/index.html");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[entries]
pattern = "./app/*/main.js"

[css]
source_map = true
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.entries.pattern, "./app/*/main.js");
        assert!(config.css.source_map);
        // Unspecified values should be defaults
        assert!(config.css.use_postcss);
        assert_eq!(config.pages.pattern, "./src/pages/*/index.html");
    }

    #[test]
    fn load_config_file_with_custom_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build.toml");
        fs::write(&path, "[notifier]\ntitle = \"shop\"\n").unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.notifier.title, "shop");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let toml = r#"
[entries]
patern = "./src/*/index.js"
"#;
        let result: Result<ProjectConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<ProjectConfig, _> = toml::from_str("[bundler]\nmode = \"fast\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[css]\nextract = true\n").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(ProjectConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_pattern() {
        let mut config = ProjectConfig::default();
        config.entries.pattern = "  ".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_bad_glob() {
        let mut config = ProjectConfig::default();
        config.pages.pattern = "./src/pages/[*/index.html".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_empty_sub_directory() {
        let mut config = ProjectConfig::default();
        config.assets.dev_sub_directory = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[pages]\npattern = \"\"\n").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("a = 3\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(3));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(2));
    }

    #[test]
    fn merge_toml_nested_table_merge() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[css]\nsource_map = true\n").unwrap();
        let merged = merge_toml(base, overlay);
        let css = merged.get("css").unwrap();
        assert_eq!(css.get("source_map").unwrap().as_bool(), Some(true));
        assert_eq!(css.get("use_postcss").unwrap().as_bool(), Some(true));
    }

    #[test]
    fn resolve_config_with_no_overlay() {
        let config = resolve_config(stock_defaults_value().unwrap(), None).unwrap();
        assert_eq!(config.assets.build_sub_directory, "static");
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let overlay: toml::Value = toml::from_str("[entries]\npattern = \"\"\n").unwrap();
        let result = resolve_config(stock_defaults_value().unwrap(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let result = load_raw_config(&tmp.path().join(CONFIG_FILE)).unwrap();
        assert!(result.is_none());
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: ProjectConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = ProjectConfig::default();
        assert_eq!(config.entries.pattern, defaults.entries.pattern);
        assert_eq!(config.pages.pattern, defaults.pages.pattern);
        assert_eq!(
            config.assets.build_sub_directory,
            defaults.assets.build_sub_directory
        );
        assert_eq!(config.css.use_postcss, defaults.css.use_postcss);
        assert_eq!(config.notifier.title, defaults.notifier.title);
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in ["[entries]", "[pages]", "[assets]", "[css]", "[notifier]"] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value().unwrap();
        assert!(val.is_table());
        for key in ["entries", "pages", "assets", "css", "notifier"] {
            assert!(val.get(key).is_some(), "missing {key}");
        }
    }
}
