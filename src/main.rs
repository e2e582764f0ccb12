use clap::{Parser, Subcommand};
use mpa_config::assets::{self, BuildMode};
use mpa_config::config;
use mpa_config::loaders::{self, LoaderOptions};
use mpa_config::notify::{BuildError, LogNotifier, NotifierCallback, Severity};
use mpa_config::{output, scan};
use serde::Deserialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build mode flag shared by commands whose output differs per mode.
#[derive(clap::Args, Clone)]
struct ModeArgs {
    /// Build mode; "production" selects production settings, anything else development
    #[arg(long, env = "NODE_ENV")]
    mode: Option<String>,
}

impl ModeArgs {
    fn build_mode(&self) -> BuildMode {
        BuildMode::from_env_value(self.mode.as_deref())
    }
}

#[derive(Parser)]
#[command(name = "mpa-config")]
#[command(about = "Bundler entries and HTML pages from your directory layout")]
#[command(long_about = "\
Bundler entries and HTML pages from your directory layout

Each directory holding a script becomes an entry named after the directory.
Each directory holding a template becomes a page of the same name that loads
the manifest, vendor and page chunks.

Project structure:

  project/
  ├── mpa.toml                     # Optional config
  └── src/
      ├── scripts/
      │   ├── admin/
      │   │   ├── index.js         # entry \"admin\"
      │   │   └── init.js          # appended to \"admin\"
      │   └── home/
      │       └── index.js         # entry \"home\"
      └── pages/
          ├── admin/index.html     # admin.html → manifest, vendor, admin
          └── home/index.html      # home.html  → manifest, vendor, home

Run 'mpa-config gen-config' to generate a documented mpa.toml.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List discovered entries
    Entries {
        /// Script glob, overrides [entries] pattern
        #[arg(long)]
        pattern: Option<String>,
    },
    /// List discovered HTML pages
    Pages {
        /// Template glob, overrides [pages] pattern
        #[arg(long)]
        pattern: Option<String>,
    },
    /// Write the JSON manifest of entries, pages and style rules
    Manifest {
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        mode: ModeArgs,
    },
    /// Resolve a path under the assets sub-directory
    AssetsPath {
        path: String,
        #[command(flatten)]
        mode: ModeArgs,
    },
    /// Print the style rules as JSON
    Loaders {
        /// Extract CSS instead of injecting it
        #[arg(long)]
        extract: bool,
        /// Emit source maps
        #[arg(long)]
        source_map: bool,
        /// Run postcss-loader after css-loader
        #[arg(long)]
        use_postcss: bool,
    },
    /// Send a notification for a bundler error report read from a JSON file
    Notify {
        /// Report file: {"severity": "error", "errors": [{"name": ..., "file": ...}]}
        report: PathBuf,
    },
    /// Validate the project layout without writing anything
    Check,
    /// Print a stock mpa.toml with all options documented
    GenConfig,
}

#[derive(Deserialize)]
struct ErrorReport {
    severity: Severity,
    #[serde(default)]
    errors: Vec<BuildError>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mpa_config=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Entries { pattern } => {
            let config = config::load_config_file(&cli.config)?;
            let pattern = pattern.unwrap_or(config.entries.pattern);
            let entries = scan::discover_entries(&pattern)?;
            output::print_entries(&entries);
        }
        Command::Pages { pattern } => {
            let config = config::load_config_file(&cli.config)?;
            let pattern = pattern.unwrap_or(config.pages.pattern);
            let pages = scan::discover_pages(&pattern)?;
            output::print_pages(&pages);
        }
        Command::Manifest { output, mode } => {
            let config = config::load_config_file(&cli.config)?;
            let mode = mode.build_mode();
            let manifest = scan::build_manifest(
                &config.entries.pattern,
                &config.pages.pattern,
                &config.loader_options(mode),
            )?;
            let json = serde_json::to_string_pretty(&manifest)?;
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent()
                        && !parent.as_os_str().is_empty()
                    {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, json)?;
                    tracing::info!(
                        path = %path.display(),
                        %mode,
                        entries = manifest.entry.len(),
                        pages = manifest.pages.len(),
                        "wrote manifest"
                    );
                }
                None => println!("{}", json),
            }
        }
        Command::AssetsPath { path, mode } => {
            let config = config::load_config_file(&cli.config)?;
            println!("{}", assets::assets_path(&config.assets, mode.build_mode(), &path));
        }
        Command::Loaders {
            extract,
            source_map,
            use_postcss,
        } => {
            let rules = loaders::style_loaders(&LoaderOptions {
                source_map,
                use_postcss,
                extract,
            });
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
        Command::Notify { report } => {
            let config = config::load_config_file(&cli.config)?;
            let content = std::fs::read_to_string(&report)?;
            let report: ErrorReport = serde_json::from_str(&content)?;
            let callback = NotifierCallback::from_config(&config.notifier, LogNotifier);
            if !callback.on_errors(report.severity, &report.errors)? {
                tracing::debug!(severity = %report.severity, "nothing to notify");
            }
        }
        Command::Check => {
            let config = config::load_config_file(&cli.config)?;
            println!("==> Checking {}", config.entries.pattern);
            let entries = scan::discover_entries(&config.entries.pattern)?;
            println!("==> Checking {}", config.pages.pattern);
            let pages = scan::discover_pages(&config.pages.pattern)?;
            output::print_check(&entries, &pages);
            println!("==> Layout is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
