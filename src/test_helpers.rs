//! Shared test utilities for the mpa-config test suite.
//!
//! Builds throwaway project trees on disk and provides extractors for
//! discovery results.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_project(&["src/scripts/admin/index.js"]);
//! let entries = discover_entries(&glob_in(&tmp, "src/scripts/*/index.js")).unwrap();
//! assert_eq!(entry_names(&entries), vec!["admin"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::{EntryMap, PageDescriptor};

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp directory containing an empty file at each relative path.
pub fn setup_project(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for rel in files {
        write_file(tmp.path(), rel);
    }
    tmp
}

fn write_file(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, "").unwrap();
}

/// Absolute glob pattern rooted at the temp project.
pub fn glob_in(tmp: &TempDir, pattern: &str) -> String {
    path_in(tmp, pattern)
}

/// Absolute path of a project file, as discovery reports it.
pub fn path_in(tmp: &TempDir, rel: &str) -> String {
    tmp.path().join(rel).to_string_lossy().to_string()
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Entry names in map order.
pub fn entry_names(entries: &EntryMap) -> Vec<&str> {
    entries.keys().map(String::as_str).collect()
}

/// Page output filenames in discovery order.
pub fn page_filenames(pages: &[PageDescriptor]) -> Vec<&str> {
    pages.iter().map(|p| p.filename.as_str()).collect()
}
