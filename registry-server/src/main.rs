//! `registry-server` command line entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use registry_server::store::{CatalogStore, EntityStore};
use registry_server::{run_server, Config};

#[derive(Parser)]
#[command(name = "registry-server")]
#[command(about = "CommonJS package registry server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file; defaults apply when it does not exist
    #[arg(
        long,
        env = "REGISTRY_CONFIG",
        default_value = "registry.json",
        global = true
    )]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the registry server
    Start {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Data directory holding the catalog and package data
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Load and validate the catalog, then list its packages
    Check {
        /// Data directory holding the catalog and package data
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

fn load_config(path: &Path, data: Option<PathBuf>) -> Result<Config> {
    let mut config = Config::load_or_default(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    if let Some(data) = data {
        config.storage.data_dir = data;
    }
    Ok(config)
}

fn check_catalog(config: &Config) -> Result<()> {
    let catalog_path = config.storage.catalog_path();
    let store = CatalogStore::open(&catalog_path, config.storage.packages_path())
        .with_context(|| format!("Invalid catalog {}", catalog_path.display()))?;
    let packages = store.list_packages()?;

    println!("Catalog {} is valid", catalog_path.display());
    for package in &packages {
        let location = if store.is_local(package.name.as_str()) {
            "local"
        } else {
            "external"
        };
        println!(
            "  {:<32} {:<8} {}",
            package.name,
            location,
            package.version_numbers().join(", ")
        );
    }
    println!("{} package(s)", packages.len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = registry_logging::init_subscriber();

    let cli = Cli::parse();

    match cli.command {
        Commands::Start { host, port, data } => {
            let mut config = load_config(&cli.config, data)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            info!(config = %cli.config.display(), "Starting registry server");
            run_server(config).await
        }

        Commands::Check { data } => {
            let config = load_config(&cli.config, data)?;
            check_catalog(&config)
        }
    }
}
