//! FactoryMod wiki report generator
//!
//! Renders the wiki tables for FactoryMod factories from a server's config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use factorymod_report::servers::{self, PageStats};
use factorymod_report::{Config, Factory, load_file, render};

#[derive(Parser)]
#[command(name = "factorymod-report")]
#[command(about = "Wiki table generator for FactoryMod configs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the config comes from: a file, or a server label under a resources
/// directory.
#[derive(Args)]
struct Source {
    /// Path to a FactoryMod config.yml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding one config per server
    #[arg(short, long)]
    resources: Option<PathBuf>,

    /// Server label, e.g. "civclassic 2.0"
    #[arg(short, long)]
    server: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the wiki tables for one factory, or all of them
    Render {
        #[command(flatten)]
        source: Source,

        /// Factory name, or "all"
        #[arg(short, long)]
        factory: String,

        /// Write pages into this directory instead of printing them
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// List the factories in a config
    Factories {
        #[command(flatten)]
        source: Source,
    },

    /// Print the upgrade graph between factories
    Upgrades {
        #[command(flatten)]
        source: Source,
    },

    /// List the server configs under a resources directory
    Servers {
        /// Directory holding one config per server
        #[arg(short, long)]
        resources: PathBuf,
    },
}

impl Source {
    /// Config path and the server label used in page titles.
    fn locate(&self) -> Result<(PathBuf, String)> {
        match (&self.config, &self.resources, &self.server) {
            (Some(path), _, Some(server)) => Ok((path.clone(), server.clone())),
            (Some(path), _, None) => {
                let label = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .ok_or_else(|| anyhow!("cannot derive a server label from {}", path.display()))?;
                Ok((path.clone(), label.to_string()))
            }
            (None, Some(resources), Some(server)) => {
                let found = servers::server_config(resources, server)?;
                Ok((found.path, found.label))
            }
            _ => bail!("pass --config <file>, or --resources <dir> with --server <label>"),
        }
    }

    fn load(&self) -> Result<(Config, String)> {
        let (path, server) = self.locate()?;
        let (config, diagnostics) =
            load_file(&path).with_context(|| format!("loading config {}", path.display()))?;
        info!(
            config = %path.display(),
            server = %server,
            factories = config.factories().len(),
            clean = diagnostics.is_clean(),
            "config loaded"
        );
        Ok((config, server))
    }
}

fn selected_factories<'a>(config: &'a Config, name: &str) -> Result<Vec<&'a Factory>> {
    if name == "all" {
        return Ok(config.factories().iter().collect());
    }
    match config.factory(name) {
        Some(factory) => Ok(vec![factory]),
        None => bail!(
            "invalid factory {:?}. Expected one of {:?}",
            name,
            config.factories().iter().map(|f| f.name.as_str()).collect::<Vec<_>>()
        ),
    }
}

fn render_pages(config: &Config, server: &str, factory: &str, out_dir: Option<&Path>) -> Result<()> {
    let mut stats = PageStats::default();
    for factory in selected_factories(config, factory)? {
        let title = servers::page_title(&factory.name, server);
        let text = render(config, factory).with_context(|| format!("rendering {}", title))?;
        match out_dir {
            Some(dir) => stats.record(servers::write_page(dir, &title, &text)?),
            None => {
                println!("{}", title);
                println!("{}", text);
                println!();
            }
        }
    }
    if out_dir.is_some() {
        println!("{}", stats);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            source,
            factory,
            out_dir,
        } => {
            let (config, server) = source.load()?;
            render_pages(&config, &server, &factory, out_dir.as_deref())?;
        }

        Commands::Factories { source } => {
            let (config, _) = source.load()?;
            if config.factories().is_empty() {
                println!("No factories in config.");
            } else {
                println!("{:<40} {:<12} {:>8}", "Factory", "Type", "Recipes");
                println!("{}", "-".repeat(62));
                for f in config.factories() {
                    let kind = f.factory_type.map_or("-", |t| t.label());
                    println!("{:<40} {:<12} {:>8}", f.name, kind, f.recipes().len());
                }
            }
        }

        Commands::Upgrades { source } => {
            let (config, _) = source.load()?;
            let mut edges = 0;
            for (from, upgrades) in &config.upgrades_to {
                for edge in upgrades {
                    println!("{} -> {} ({})", from, edge.factory, edge.recipe.display_name());
                    edges += 1;
                }
            }
            if edges == 0 {
                println!("No upgrades in config.");
            }
        }

        Commands::Servers { resources } => {
            let configs = servers::find_server_configs(&resources);
            if configs.is_empty() {
                println!("No server configs under {}.", resources.display());
            } else {
                for c in configs {
                    println!("{:<24} {}", c.label, c.path.display());
                }
            }
        }
    }

    Ok(())
}
