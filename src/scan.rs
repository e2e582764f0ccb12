//! Entry and page discovery.
//!
//! Expands a glob pattern and turns the matched files into bundler
//! configuration. The project layout is one directory per page:
//!
//! ```text
//! src/
//! ├── scripts/
//! │   ├── admin/
//! │   │   ├── index.js        # entry "admin"
//! │   │   └── init.js         # also entry "admin" (appended)
//! │   └── home/
//! │       └── index.js        # entry "home"
//! └── pages/
//!     ├── admin/
//!     │   └── index.html      # admin.html, chunks [manifest, vendor, admin]
//!     └── home/
//!         └── index.html      # home.html, chunks [manifest, vendor, home]
//! ```
//!
//! ## Output
//!
//! - [`discover_entries`] produces an [`EntryMap`] for the bundler's `entry`
//!   field.
//! - [`discover_pages`] produces one [`PageDescriptor`] per template for the
//!   HTML plugin.
//! - [`build_manifest`] bundles both (plus the style rules) into a single
//!   JSON document.
//!
//! ## Ordering
//!
//! Results follow glob expansion order. Nothing is sorted or deduplicated:
//! two templates under directories with the same name produce two descriptors
//! with the same `filename`, and two script directories with the same name in
//! different trees merge into one entry.

use crate::loaders::{self, StyleRule};
use crate::naming;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),
    #[error("Matched file has no parent directory to name it after: {0}")]
    NoParentDirectory(PathBuf),
}

/// Chunks every page loads ahead of its own bundle.
pub const COMMON_CHUNKS: [&str; 2] = ["manifest", "vendor"];

/// Where the HTML plugin injects script tags.
pub const INJECT_POSITION: &str = "body";

/// Entry name → source files, in first-seen order.
pub type EntryMap = IndexMap<String, Vec<String>>;

/// HTML plugin configuration for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDescriptor {
    /// Output file, `<dir>.html`
    pub filename: String,
    /// The matched template path, unchanged
    pub template: String,
    pub inject: String,
    /// `manifest`, `vendor`, then the page's own entry name
    pub chunks: Vec<String>,
}

/// Everything the bundler config needs, as one JSON document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub entry: EntryMap,
    pub pages: Vec<PageDescriptor>,
    pub style_rules: Vec<StyleRule>,
}

/// Expand `pattern` synchronously into the matched paths, in glob order.
///
/// Wildcards don't match dot-files or dot-directories. A `./` prefix on the
/// pattern is kept on every match so the bundler resolves them as relative
/// requests rather than bare module names.
pub fn expand(pattern: &str) -> Result<Vec<PathBuf>, ScanError> {
    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..glob::MatchOptions::new()
    };
    let mut paths = Vec::new();
    for entry in glob::glob_with(pattern, options)? {
        paths.push(keep_dot_prefix(pattern, entry?));
    }
    Ok(paths)
}

/// Put back the leading `./` that glob expansion strips from matches.
fn keep_dot_prefix(pattern: &str, path: PathBuf) -> PathBuf {
    let dotted = pattern.starts_with("./") || pattern.starts_with(".\\");
    if dotted && !path.starts_with(".") && path.is_relative() {
        Path::new(".").join(path)
    } else {
        path
    }
}

/// Discover bundler entries from a script glob such as `./src/scripts/*/index.js`.
///
/// A pattern with no matches yields an empty map.
pub fn discover_entries(pattern: &str) -> Result<EntryMap, ScanError> {
    let paths = expand(pattern)?;
    let entries = entries_from_paths(&paths)?;
    for name in colliding_entries(&entries) {
        tracing::warn!(pattern, entry = name, "entry merges files from more than one directory");
    }
    tracing::debug!(pattern, count = entries.len(), "discovered entries");
    Ok(entries)
}

/// Group already expanded paths by their logical name.
///
/// Paths sharing a parent directory name are appended to the same entry in
/// the order given.
pub fn entries_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<EntryMap, ScanError> {
    let mut entries = EntryMap::new();
    for path in paths {
        let path = path.as_ref();
        let name = name_for(path)?;
        entries
            .entry(name)
            .or_default()
            .push(path.to_string_lossy().to_string());
    }
    Ok(entries)
}

/// Discover HTML page configs from a template glob such as `./src/pages/*/index.html`.
///
/// The resulting list is also written to the debug log.
pub fn discover_pages(pattern: &str) -> Result<Vec<PageDescriptor>, ScanError> {
    let paths = expand(pattern)?;
    let pages = pages_from_paths(&paths)?;
    tracing::debug!(pattern, ?pages, "discovered pages");
    Ok(pages)
}

/// Build one descriptor per template path, in the order given.
pub fn pages_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PageDescriptor>, ScanError> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let name = name_for(path)?;
            Ok(PageDescriptor {
                filename: naming::page_filename(&name),
                template: path.to_string_lossy().to_string(),
                inject: INJECT_POSITION.to_string(),
                chunks: COMMON_CHUNKS
                    .iter()
                    .map(|c| c.to_string())
                    .chain(std::iter::once(name))
                    .collect(),
            })
        })
        .collect()
}

/// Run both discoveries and attach the standalone style rules.
pub fn build_manifest(
    entry_pattern: &str,
    page_pattern: &str,
    css: &loaders::LoaderOptions,
) -> Result<Manifest, ScanError> {
    Ok(Manifest {
        entry: discover_entries(entry_pattern)?,
        pages: discover_pages(page_pattern)?,
        style_rules: loaders::style_loaders(css),
    })
}

/// Entry names fed by more than one distinct directory.
///
/// These are the collisions [`entries_from_paths`] merges silently; callers
/// can surface them as warnings.
pub fn colliding_entries(entries: &EntryMap) -> Vec<&str> {
    entries
        .iter()
        .filter(|(_, files)| {
            let mut dirs: Vec<&Path> = files
                .iter()
                .filter_map(|f| Path::new(f).parent())
                .collect();
            dirs.sort();
            dirs.dedup();
            dirs.len() > 1
        })
        .map(|(name, _)| name.as_str())
        .collect()
}

/// Page output filenames produced by more than one template.
pub fn duplicate_page_filenames(pages: &[PageDescriptor]) -> Vec<&str> {
    let mut seen: IndexMap<&str, usize> = IndexMap::new();
    for page in pages {
        *seen.entry(page.filename.as_str()).or_default() += 1;
    }
    seen.into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(name, _)| name)
        .collect()
}

fn name_for(path: &Path) -> Result<String, ScanError> {
    naming::logical_name(path).ok_or_else(|| ScanError::NoParentDirectory(path.to_path_buf()))
}
