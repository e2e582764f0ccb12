//! CLI output formatting for discovery results.
//!
//! # Output Format
//!
//! ## Entries
//!
//! ```text
//! Entries
//! 001 admin (2 files)
//!     src/scripts/admin/index.js
//!     src/scripts/admin/init.js
//! 002 home (1 file)
//!     src/scripts/home/index.js
//! ```
//!
//! ## Pages
//!
//! ```text
//! Pages
//! 001 home.html
//!     Template: src/pages/home/index.html
//!     Chunks: manifest, vendor, home
//! ```
//!
//! ## Check
//!
//! ```text
//! Found 2 entries (3 files), 1 page
//! Warning: entry 'admin' merges files from more than one directory
//! Warning: page 'home.html' is produced by more than one template
//! Warning: page 'about.html' has no matching entry
//! ```
//!
//! Each section has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::scan::{self, EntryMap, PageDescriptor};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

pub fn format_entries(entries: &EntryMap) -> Vec<String> {
    let mut lines = vec!["Entries".to_string()];
    for (i, (name, files)) in entries.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            name,
            plural(files.len(), "file", "files")
        ));
        for file in files {
            lines.push(format!("{}{}", indent(1), file));
        }
    }
    lines
}

pub fn format_pages(pages: &[PageDescriptor]) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    for (i, page) in pages.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), page.filename));
        lines.push(format!("{}Template: {}", indent(1), page.template));
        lines.push(format!("{}Chunks: {}", indent(1), page.chunks.join(", ")));
    }
    lines
}

/// Summary plus warnings for the ambiguous cases discovery preserves.
pub fn format_check(entries: &EntryMap, pages: &[PageDescriptor]) -> Vec<String> {
    let file_count: usize = entries.values().map(Vec::len).sum();
    let mut lines = vec![format!(
        "Found {} ({}), {}",
        plural(entries.len(), "entry", "entries"),
        plural(file_count, "file", "files"),
        plural(pages.len(), "page", "pages"),
    )];

    for name in scan::colliding_entries(entries) {
        lines.push(format!(
            "Warning: entry '{name}' merges files from more than one directory"
        ));
    }
    for filename in scan::duplicate_page_filenames(pages) {
        lines.push(format!(
            "Warning: page '{filename}' is produced by more than one template"
        ));
    }
    for page in pages {
        if let Some(chunk) = page.chunks.last()
            && !entries.contains_key(chunk)
        {
            lines.push(format!(
                "Warning: page '{}' has no matching entry",
                page.filename
            ));
        }
    }
    lines
}

pub fn print_entries(entries: &EntryMap) {
    for line in format_entries(entries) {
        println!("{}", line);
    }
}

pub fn print_pages(pages: &[PageDescriptor]) {
    for line in format_pages(pages) {
        println!("{}", line);
    }
}

pub fn print_check(entries: &EntryMap, pages: &[PageDescriptor]) {
    for line in format_check(entries, pages) {
        println!("{}", line);
    }
}
