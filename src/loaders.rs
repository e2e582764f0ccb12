//! Style loader chain descriptions.
//!
//! Produces the loader configuration for every stylesheet flavour the
//! bundler handles. The chains are plain data: this module never runs a
//! preprocessor, it only describes which ones apply and in what order.
//!
//! ## Chain Shape
//!
//! ```text
//! inline  : vue-style-loader → css-loader → [postcss-loader] → [<pre>-loader]
//! extract : { use: [css-loader, [postcss-loader], [<pre>-loader]],
//!             fallback: vue-style-loader }
//! ```
//!
//! Every loader object carries `options.sourceMap` so source maps are either
//! on for the whole chain or off for the whole chain.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Loader that injects CSS into the document at runtime.
pub const STYLE_LOADER: &str = "vue-style-loader";

/// Stylesheet extensions and the preprocessor each one needs.
const EXTENSIONS: &[(&str, Option<Preprocessor>)] = &[
    ("css", None),
    ("postcss", None),
    ("less", Some(Preprocessor::Less)),
    ("sass", Some(Preprocessor::IndentedSass)),
    ("scss", Some(Preprocessor::Sass)),
    ("stylus", Some(Preprocessor::Stylus)),
    ("styl", Some(Preprocessor::Stylus)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Preprocessor {
    Less,
    Sass,
    IndentedSass,
    Stylus,
}

impl Preprocessor {
    fn loader(self) -> &'static str {
        match self {
            Preprocessor::Less => "less-loader",
            Preprocessor::Sass | Preprocessor::IndentedSass => "sass-loader",
            Preprocessor::Stylus => "stylus-loader",
        }
    }

    fn options(self) -> Map<String, Value> {
        let mut options = Map::new();
        if self == Preprocessor::IndentedSass {
            options.insert("indentedSyntax".into(), Value::Bool(true));
        }
        options
    }
}

/// Flags controlling chain construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Emit source maps from every loader in the chain.
    pub source_map: bool,
    /// Insert `postcss-loader` after `css-loader`.
    pub use_postcss: bool,
    /// Extract CSS to a separate file instead of injecting it.
    pub extract: bool,
}

/// One step of a loader chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Loader {
    /// Bare loader name, no options.
    Name(String),
    WithOptions {
        loader: String,
        options: Map<String, Value>,
    },
}

impl Loader {
    fn with_source_map(name: &str, mut options: Map<String, Value>, source_map: bool) -> Self {
        options.insert("sourceMap".into(), Value::Bool(source_map));
        Loader::WithOptions {
            loader: name.to_string(),
            options,
        }
    }

    /// The loader's module name.
    pub fn name(&self) -> &str {
        match self {
            Loader::Name(name) => name,
            Loader::WithOptions { loader, .. } => loader,
        }
    }
}

/// Loaders applied to one stylesheet extension.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LoaderChain {
    /// Style loader first, then the CSS loaders.
    Inline(Vec<Loader>),
    /// Handed to the CSS extraction plugin.
    Extract {
        #[serde(rename = "use")]
        use_: Vec<Loader>,
        fallback: String,
    },
}

impl LoaderChain {
    /// Loader names in application order, fallback excluded.
    pub fn loader_names(&self) -> Vec<&str> {
        let loaders = match self {
            LoaderChain::Inline(loaders) => loaders,
            LoaderChain::Extract { use_, .. } => use_,
        };
        loaders.iter().map(Loader::name).collect()
    }
}

/// A module rule for standalone stylesheets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRule {
    /// Regex source the bundler matches filenames against, e.g. `\.scss$`.
    pub test: String,
    #[serde(rename = "use")]
    pub use_: LoaderChain,
    #[serde(skip)]
    extension: String,
}

impl StyleRule {
    /// Whether `filename` ends with this rule's extension.
    pub fn matches(&self, filename: &str) -> bool {
        filename
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext == self.extension)
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

fn generate_loaders(options: &LoaderOptions, preprocessor: Option<Preprocessor>) -> LoaderChain {
    let mut loaders = vec![Loader::with_source_map(
        "css-loader",
        Map::new(),
        options.source_map,
    )];
    if options.use_postcss {
        loaders.push(Loader::with_source_map(
            "postcss-loader",
            Map::new(),
            options.source_map,
        ));
    }
    if let Some(pre) = preprocessor {
        loaders.push(Loader::with_source_map(
            pre.loader(),
            pre.options(),
            options.source_map,
        ));
    }

    if options.extract {
        LoaderChain::Extract {
            use_: loaders,
            fallback: STYLE_LOADER.to_string(),
        }
    } else {
        let mut chain = vec![Loader::Name(STYLE_LOADER.to_string())];
        chain.extend(loaders);
        LoaderChain::Inline(chain)
    }
}

/// Loader chain per stylesheet extension, in a fixed order:
/// `css`, `postcss`, `less`, `sass`, `scss`, `stylus`, `styl`.
pub fn css_loaders(options: &LoaderOptions) -> IndexMap<String, LoaderChain> {
    EXTENSIONS
        .iter()
        .map(|(ext, pre)| (ext.to_string(), generate_loaders(options, *pre)))
        .collect()
}

/// Module rules for stylesheets outside single-file components.
pub fn style_loaders(options: &LoaderOptions) -> Vec<StyleRule> {
    css_loaders(options)
        .into_iter()
        .map(|(extension, chain)| StyleRule {
            test: format!(r"\.{extension}$"),
            use_: chain,
            extension,
        })
        .collect()
}
