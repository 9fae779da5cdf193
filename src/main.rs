//! CLI entry point for portfolio-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_rs::aggregate::PostRange;
use portfolio_rs::github::{RepoFilter, RepoSort};
use portfolio_rs::Portfolio;

#[derive(Parser)]
#[command(name = "portfolio-rs")]
#[command(version)]
#[command(about = "Content backend for a personal portfolio site", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API and static assets
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List site content
    List {
        /// Type of content to list (work, blog, service, route)
        #[arg(default_value = "work")]
        r#type: String,
    },

    /// Show local work merged with public repositories
    Projects {
        /// First project to show, 1-based
        #[arg(long)]
        start: Option<usize>,

        /// Stop before this project, 1-based
        #[arg(long)]
        end: Option<usize>,

        /// Skip the repository request
        #[arg(long)]
        offline: bool,
    },

    /// Show the repository showcase
    Repos {
        /// all, featured or recent
        #[arg(short, long, default_value = "all")]
        filter: RepoFilter,

        /// updated, stars, forks or name
        #[arg(short, long, default_value = "updated")]
        sort: RepoSort,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "portfolio_rs=debug,info"
    } else {
        "portfolio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Serve { port, ip } => {
            let portfolio = Portfolio::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            portfolio_rs::server::start(portfolio, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let portfolio = Portfolio::new(&base_dir)?;
            portfolio_rs::commands::list::run(&portfolio, &r#type)?;
        }

        Commands::Projects {
            start,
            end,
            offline,
        } => {
            let portfolio = Portfolio::new(&base_dir)?;
            let range = if start.is_some() || end.is_some() {
                Some(PostRange::new(start.unwrap_or(1), end))
            } else {
                None
            };
            portfolio_rs::commands::projects::run(&portfolio, range, offline).await?;
        }

        Commands::Repos { filter, sort } => {
            let portfolio = Portfolio::new(&base_dir)?;
            portfolio_rs::commands::repos::run(&portfolio, filter, sort).await?;
        }

        Commands::Version => {
            println!("portfolio-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
