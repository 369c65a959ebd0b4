//! HPA Reconciler CLI
//!
//! A one-shot command-line tool for applying a recommendation set to a
//! target specification stored as JSON, and for inspecting stored
//! specifications.

mod commands;
mod output;
mod store;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// HPA Reconciler CLI
#[derive(Parser)]
#[command(name = "hparec")]
#[command(author, version, about = "Apply scaling recommendations to stored HPA specifications", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply a recommendation set to a stored target specification
    Apply {
        /// Directory holding target specifications (<dir>/<namespace>/<name>.json)
        #[arg(long, env = "HPAREC_STORE_DIR", default_value = ".")]
        store_dir: PathBuf,

        /// Target namespace
        #[arg(long, short)]
        namespace: String,

        /// Target name
        #[arg(long)]
        name: String,

        /// Recommendation set JSON file
        #[arg(long, short)]
        recommendations: PathBuf,

        /// Instant to resolve replica windows at (RFC 3339; defaults to now)
        #[arg(long)]
        at: Option<DateTime<Utc>>,

        /// Apply in memory and print the result without persisting
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the metric entries of a stored target specification
    Inspect {
        /// Directory holding target specifications (<dir>/<namespace>/<name>.json)
        #[arg(long, env = "HPAREC_STORE_DIR", default_value = ".")]
        store_dir: PathBuf,

        /// Target namespace
        #[arg(long, short)]
        namespace: String,

        /// Target name
        #[arg(long)]
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Apply {
            store_dir,
            namespace,
            name,
            recommendations,
            at,
            dry_run,
        } => {
            let now = at.unwrap_or_else(Utc::now);
            commands::apply(
                &store_dir,
                &namespace,
                &name,
                &recommendations,
                now,
                dry_run,
                cli.format,
            )
            .await?;
        }
        Commands::Inspect {
            store_dir,
            namespace,
            name,
        } => {
            commands::inspect(&store_dir, &namespace, &name, cli.format).await?;
        }
    }

    Ok(())
}
