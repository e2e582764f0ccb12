//! # mpa-config
//!
//! Derives bundler configuration for multi-page front-end projects from the
//! directory layout. Your filesystem is the data source: every directory
//! under `src/scripts/` becomes an entry, every template under `src/pages/`
//! becomes an HTML page that loads the entry of the same name.
//!
//! ```text
//! src/scripts/admin/index.js  →  entry  "admin"
//! src/pages/admin/index.html  →  page   admin.html [manifest, vendor, admin]
//! ```
//!
//! The result is a JSON manifest the bundler configuration reads:
//!
//! ```text
//! {
//!   "entry": { "admin": ["./src/scripts/admin/index.js"] },
//!   "pages": [{ "filename": "admin.html", "template": "./src/pages/admin/index.html",
//!               "inject": "body", "chunks": ["manifest", "vendor", "admin"] }],
//!   "styleRules": [{ "test": "\\.css$", "use": [...] }, ...]
//! }
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | The directory-name rule shared by entries and pages |
//! | [`scan`] | Glob expansion, entry discovery, page discovery, the manifest |
//! | [`assets`] | Asset sub-directory resolution per build mode |
//! | [`loaders`] | Style loader chains per stylesheet extension |
//! | [`notify`] | Build failure notifications |
//! | [`config`] | `mpa.toml` loading, validation, and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Naming Rule
//!
//! The entry key and the page's own chunk are produced by the same function,
//! [`naming::logical_name`]. Renaming a page directory renames both, so a
//! page can never load a bundle that was built under a different name.
//!
//! ## Scan Order, No Cleanup
//!
//! Discovery returns what the glob returns, in the order it returns it.
//! Colliding directory names merge into one entry and duplicate page
//! filenames are kept. Both cases are reported by `mpa-config check` rather
//! than silently repaired.
//!
//! ## Explicit Build Mode
//!
//! Functions that depend on production vs. development take a
//! [`assets::BuildMode`] argument. Only the CLI looks at `NODE_ENV`.

pub mod assets;
pub mod config;
pub mod loaders;
pub mod naming;
pub mod notify;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
