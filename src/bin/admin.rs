//! CLI administration tool for link-reducer.
//!
//! Creates and inspects short links and checks the database without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a link (prompts when URL is omitted)
//! cargo run --bin admin -- link create https://example.com/page
//!
//! # Inspect a short code
//! cargo run --bin admin -- link show aB3dE
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `DOMAIN` (optional): prefix for printed short URLs

use link_reducer::AppError;
use link_reducer::application::services::LinkService;
use link_reducer::infrastructure::persistence::PgLinkRepository;
use link_reducer::utils::code_generator::RandomCodeGenerator;
use link_reducer::utils::url_shape::is_url_like;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-reducer.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Shorten a link, or print the code it already has
    Create {
        /// Source link (prompted for when omitted)
        url: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a short code's source link and visit count
    Show {
        /// Five-character short code
        code: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let domain =
        std::env::var("DOMAIN").unwrap_or_else(|_| "http://localhost:8080".to_string());

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool, &domain).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, domain: &str) -> Result<()> {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let service = LinkService::new(repo, Arc::new(RandomCodeGenerator::new()));

    match action {
        LinkAction::Create { url, yes } => create_link(&service, domain, url, yes).await,
        LinkAction::Show { code } => show_link(&service, domain, &code).await,
    }
}

/// Shortens a link through the same resolver the HTTP API uses.
async fn create_link(
    service: &LinkService<PgLinkRepository>,
    domain: &str,
    url: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let src_link = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Source link")
            .with_initial_text("https://")
            .interact_text()?,
    };

    if !is_url_like(&src_link) {
        anyhow::bail!("'{}' does not look like a URL", src_link);
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Shorten {}?", src_link))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let code = service
        .resolve(&src_link)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten link: {}", e))?;

    println!();
    println!("{}", "✅ Short link ready".green().bold());
    println!("  Source: {}", src_link.cyan());
    println!(
        "  Short:  {}",
        service.get_short_url(domain, &code).bright_yellow().bold()
    );
    println!();

    Ok(())
}

/// Prints a link's details.
///
/// Read-only: this does not count as a visit.
async fn show_link(
    service: &LinkService<PgLinkRepository>,
    domain: &str,
    code: &str,
) -> Result<()> {
    let link = match service.get_link(code).await {
        Ok(link) => link,
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("⚠️  No link with code '{}'", code).yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Database error: {}", e)),
    };

    println!("{}", "🔎 Short Link".bright_blue().bold());
    println!();
    println!("  Short:   {}", service.get_short_url(domain, code).cyan());
    println!("  Source:  {}", link.source_link.bright_white());
    println!(
        "  Visits:  {}",
        link.visits.to_string().bright_green().bold()
    );
    println!(
        "  Created: {}",
        link.created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Displays totals across all links.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let visits_total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(visits), 0)::BIGINT FROM links")
        .fetch_one(pool)
        .await?;

    println!(
        "  Links:  {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Visits: {}",
        visits_total.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
