//! Wildlife prints CLI - catalog sheet tools.
//!
//! # Usage
//!
//! ```bash
//! # Check the store sheet named by STORE_SHEET_CSV_URL
//! prints-cli catalog check store
//!
//! # Check any published sheet as a limited edition catalog
//! prints-cli catalog check limited-edition --url "https://docs.google.com/.../pub?output=csv"
//!
//! # Write the built-in store fallback to a file
//! prints-cli catalog fallback store -o store-fallback.json
//! ```
//!
//! # Commands
//!
//! - `catalog check` - Fetch and parse a sheet, report products and data issues
//! - `catalog fallback` - Print the built-in fallback products as JSON

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use url::Url;
use wildlife_prints_storefront::catalog::CatalogKind;

mod commands;

#[derive(Parser)]
#[command(name = "prints-cli")]
#[command(author, version, about = "Wildlife prints CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect catalog sheets and fallback data
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Fetch and parse a catalog sheet once
    Check {
        /// Catalog (`store` or `limited-edition`)
        kind: CatalogKind,

        /// Sheet CSV URL (defaults to the catalog's env var)
        #[arg(short, long)]
        url: Option<Url>,

        /// Fetch timeout in seconds
        #[arg(short, long, default_value_t = 8)]
        timeout: u64,

        /// Number of products to list
        #[arg(short, long, default_value_t = 5)]
        rows: usize,
    },
    /// Print the built-in fallback products as JSON
    Fallback {
        /// Catalog (`store` or `limited-edition`)
        kind: CatalogKind,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Check {
                kind,
                url,
                timeout,
                rows,
            } => {
                commands::catalog::check(kind, url, Duration::from_secs(timeout), rows).await?;
            }
            CatalogAction::Fallback { kind, output } => {
                commands::catalog::dump_fallback(kind, output.as_deref())?;
            }
        },
    }
    Ok(())
}
