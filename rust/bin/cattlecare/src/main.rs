//! `cattlecare`: admin CLI for the cattle-care document store.
//!
//! Usage:
//!   cattlecare [--config <path>] [--db <connection>] <command>
//!
//! The connection string is `redb://<path>` or `memory://`.

mod commands;

use std::path::PathBuf;

use cattlecare_core::StoreConfig;
use clap::{Parser, Subcommand};
use herd::Herd;
use tracing::info;

/// Cattle-care store admin tool.
#[derive(Parser, Debug)]
#[command(name = "cattlecare", about = "Cattle-care store admin CLI")]
struct Cli {
    /// Path to a TOML config file with a [store] table.
    #[arg(long = "config", short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Connection string (overrides the config file).
    #[arg(long = "db", global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List collections with their document counts.
    Collections,

    /// Get one document, or list a collection.
    Get {
        /// Collection (e.g. cows, health_reports).
        collection: String,
        /// Document id.
        id: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        offset: Option<usize>,
    },

    /// Validate and save a document given as JSON.
    Create {
        collection: String,
        /// JSON body.
        #[arg(long = "json")]
        json_body: Option<String>,
        /// Read JSON from file.
        #[arg(short = 'f', long = "file")]
        file: Option<PathBuf>,
    },

    /// Delete a document. Documents referencing it are not touched.
    Delete {
        collection: String,
        id: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            StoreConfig::load(path)?
        }
        None => StoreConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.apply_args(&[format!("--db={}", db)]);
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let herd = Herd::connect(&config.connection)?;

    match cli.command {
        Commands::Collections => {
            for (name, count) in herd.counts()? {
                println!("{:<16} {}", name, count);
            }
        }

        Commands::Get {
            collection,
            id,
            limit,
            offset,
        } => {
            let out = commands::resource::get(&herd, &collection, id.as_deref(), limit, offset)?;
            println!("{}", serde_json::to_string_pretty(&out)?);
        }

        Commands::Create {
            collection,
            json_body,
            file,
        } => {
            let body = if let Some(path) = file {
                std::fs::read_to_string(&path)?
            } else if let Some(json) = json_body {
                json
            } else {
                anyhow::bail!("Provide --json or -f <file>.");
            };
            let out = commands::resource::create(&herd, &collection, &body)?;
            println!("{}", serde_json::to_string_pretty(&out)?);
        }

        Commands::Delete {
            collection,
            id,
            yes,
        } => {
            if !yes {
                eprint!("Are you sure? [y/N]: ");
                let mut s = String::new();
                std::io::stdin().read_line(&mut s)?;
                if !s.trim().eq_ignore_ascii_case("y") {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            commands::resource::delete(&herd, &collection, &id)?;
            println!("Deleted {} '{}'.", collection, id);
        }
    }

    Ok(())
}
