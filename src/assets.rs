//! Public asset path resolution.
//!
//! Emitted assets (images, fonts, extracted CSS) live under a sub-directory
//! of the output that differs between production and development builds.
//! [`assets_path`] prefixes a relative path with the right one:
//!
//! ```text
//! production,  build_sub_directory = "static"  : img/logo.png → static/img/logo.png
//! development, dev_sub_directory   = "assets"  : img/logo.png → assets/img/logo.png
//! ```
//!
//! The build mode is an explicit argument; nothing here reads `NODE_ENV`.
//! Use [`BuildMode::from_env_value`] at the edge to translate it.

use crate::config::AssetsConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which build the paths are being resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Production,
    #[default]
    Development,
}

impl BuildMode {
    /// Interpret a `NODE_ENV`-style value: `"production"` or development.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("production") => BuildMode::Production,
            _ => BuildMode::Development,
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Production => write!(f, "production"),
            BuildMode::Development => write!(f, "development"),
        }
    }
}

/// The assets sub-directory for `mode`.
pub fn sub_directory(config: &AssetsConfig, mode: BuildMode) -> &str {
    match mode {
        BuildMode::Production => &config.build_sub_directory,
        BuildMode::Development => &config.dev_sub_directory,
    }
}

/// Join `path` onto the assets sub-directory for `mode`.
pub fn assets_path(config: &AssetsConfig, mode: BuildMode, path: &str) -> String {
    posix_join(&[sub_directory(config, mode), path])
}

/// Join and normalize forward-slash paths.
///
/// - Empty and `.` segments are dropped; repeated slashes collapse.
/// - `..` removes the previous segment, or is kept if there is none to remove
///   (relative paths only).
/// - A leading `/` on the first part makes the result absolute.
/// - A trailing `/` on the last part is preserved.
/// - An empty result is `"."`.
pub fn posix_join(parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");
    if joined.is_empty() {
        return ".".to_string();
    }

    let absolute = joined.starts_with('/');
    let trailing = joined.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let mut out = segments.join("/");
    if absolute {
        out.insert(0, '/');
    }
    if out.is_empty() {
        out.push('.');
    }
    if trailing && !out.ends_with('/') {
        out.push('/');
    }
    out
}
