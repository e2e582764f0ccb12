//! The directory naming convention shared by entry and page discovery.
//!
//! Every discovered file is named after the directory that contains it:
//!
//! ```text
//! src/scripts/admin/index.js   → admin
//! src/scripts/admin/init.js    → admin
//! src/pages/home/index.html    → home
//! ```
//!
//! Entry keys and the per-page chunk name are both produced by
//! [`logical_name`], so a page template in `pages/home/` always pulls in the
//! bundle emitted for `scripts/home/`.

use std::path::Path;

/// Logical name for a discovered file: the final segment of its parent directory.
///
/// Returns `None` when the path has no meaningful parent segment:
/// - `"index.js"` (parent is empty)
/// - `"/index.js"` (parent is the filesystem root)
/// - `"./index.js"` (parent is `.`)
/// - `"../index.js"` (parent is `..`)
///
/// Interior `.` segments are skipped when finding the parent, so
/// `"a/./b.js"` is named `a`. Glob expansion never produces such paths.
pub fn logical_name(path: &Path) -> Option<String> {
    let name = path.parent()?.file_name()?;
    Some(name.to_string_lossy().into_owned())
}

/// Output HTML filename for a page whose directory is `name`.
pub fn page_filename(name: &str) -> String {
    format!("{name}.html")
}
