//! Marigold Threads CLI - database migrations and catalog seeding.
//!
//! # Usage
//!
//! ```bash
//! # Create the product table
//! marigold-cli migrate catalog
//!
//! # Create the session store schema
//! marigold-cli migrate sessions
//!
//! # Run both
//! marigold-cli migrate all
//!
//! # Load products from a YAML file
//! marigold-cli seed products --file seeds/products.yaml
//!
//! # Replace the catalog with the file contents
//! marigold-cli seed products --file seeds/products.yaml --clear
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "marigold-cli")]
#[command(author, version, about = "Marigold Threads CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Seed the database
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Create the product table
    Catalog,
    /// Create the tower-sessions store schema
    Sessions,
    /// Run every migration
    All,
}

#[derive(Subcommand)]
enum SeedAction {
    /// Load products from a YAML file
    Products {
        /// Path to the YAML seed file
        #[arg(short, long)]
        file: String,

        /// Truncate the product table before inserting
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Catalog => commands::migrate::catalog().await?,
            MigrateTarget::Sessions => commands::migrate::sessions().await?,
            MigrateTarget::All => {
                commands::migrate::catalog().await?;
                commands::migrate::sessions().await?;
            }
        },
        Commands::Seed { action } => match action {
            SeedAction::Products { file, clear } => {
                commands::seed::products(&file, clear).await?;
            }
        },
    }
    Ok(())
}
