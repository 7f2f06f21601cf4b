//! CLI administration tool for the URL shortener.
//!
//! Provides record inspection, deactivation and statistics without going
//! through the HTTP API. Records are addressed by their secret key.
//!
//! # Usage
//!
//! ```bash
//! # Show a record
//! cargo run --bin admin -- url info X9D0PL3A
//!
//! # Deactivate a record (its key stays reserved)
//! cargo run --bin admin -- url deactivate X9D0PL3A
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
//! - `DATABASE_URL` / `DB_URL`: SQLite connection string (see the `config` module)

use keyed_url_shortener::config::Config;
use keyed_url_shortener::domain::entities::UrlRecord;
use keyed_url_shortener::domain::repositories::UrlRepository;
use keyed_url_shortener::infrastructure::persistence::{SqliteUrlRepository, pool};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing the URL shortener.
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
    /// Inspect or deactivate short URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Record management subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// Show a record by its secret key
    Info {
        /// Secret key returned at creation time
        secret_key: String,
    },

    /// Deactivate a record by its secret key
    Deactivate {
        /// Secret key returned at creation time
        secret_key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;

    let pool = pool::connect(
        &config.database_url,
        1,
        Duration::from_secs(config.db_connect_timeout),
    )
    .await
    .context("Failed to connect to database")?;

    pool::migrate(&pool)
        .await
        .context("Failed to run migrations")?;

    let result = match cli.command {
        Commands::Url { action } => handle_url_action(action, &pool).await,
        Commands::Stats => handle_stats(&pool).await,
        Commands::Db { action } => handle_db_action(action, &pool, &config).await,
    };

    pool.close().await;

    result
}

/// Dispatches record management commands.
async fn handle_url_action(action: UrlAction, pool: &SqlitePool) -> Result<()> {
    let repo = SqliteUrlRepository::new(Arc::new(pool.clone()));

    match action {
        UrlAction::Info { secret_key } => show_url(&repo, &secret_key).await,
        UrlAction::Deactivate { secret_key, yes } => {
            deactivate_url(&repo, &secret_key, yes).await
        }
    }
}

async fn find_record(repo: &SqliteUrlRepository, secret_key: &str) -> Result<UrlRecord> {
    repo.find_by_secret_key(secret_key)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("No URL with this secret key")
}

fn print_record(record: &UrlRecord) {
    let status = if record.is_active() {
        "ACTIVE".green()
    } else {
        "INACTIVE".red()
    };

    println!("  Key:    {}", record.key.cyan());
    println!("  Target: {}", record.target_url.bright_white());
    println!("  Clicks: {}", record.clicks.to_string().bright_white());
    println!("  Status: {}", status);
}

/// Prints a record's target, status and click count.
async fn show_url(repo: &SqliteUrlRepository, secret_key: &str) -> Result<()> {
    println!("{}", "🔗 Short URL".bright_blue().bold());
    println!();

    let record = find_record(repo, secret_key).await?;
    print_record(&record);
    println!();

    Ok(())
}

/// Deactivates a record after confirmation.
///
/// The record stops resolving; its key and secret key remain reserved.
async fn deactivate_url(
    repo: &SqliteUrlRepository,
    secret_key: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔒 Deactivate Short URL".bright_blue().bold());
    println!();

    let record = find_record(repo, secret_key).await?;

    if !record.is_active() {
        println!("{}", "⚠️  This URL is already inactive".yellow());
        return Ok(());
    }

    print_record(&record);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Deactivate this URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deactivated = repo
        .deactivate(secret_key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to deactivate URL: {}", e))?;

    println!();
    if deactivated {
        println!("{}", "✅ URL deactivated".green().bold());
    } else {
        println!("{}", "⚠️  URL was deactivated concurrently".yellow());
    }
    println!();

    Ok(())
}

/// Displays record and click totals.
async fn handle_stats(pool: &SqlitePool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = SqliteUrlRepository::new(Arc::new(pool.clone()));
    let stats = repo
        .stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  URLs:   {} ({} active)",
        stats.total.to_string().bright_white().bold(),
        stats.active.to_string().green()
    );
    println!(
        "  Clicks: {}",
        stats.clicks.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await
                .context("Database query failed")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Environment: {}", config.env_name.cyan());
            println!("  SQLite:      {}", version.bright_black());
            println!();
        }
    }

    Ok(())
}
