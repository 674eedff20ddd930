//! CLI administration tool for the marketplace catalog.
//!
//! Users and categories have no HTTP API; products and wishlist entries must
//! reference existing rows, so this tool is how they get created.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for the name when omitted)
//! cargo run --bin admin -- user create --name "Ana"
//!
//! # List categories
//! cargo run --bin admin -- category list
//!
//! # Catalog counts
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use marketplace_catalog::config::Config;
use marketplace_catalog::infrastructure::persistence::PgReferenceRepository;
use marketplace_catalog::server::connect_pool;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing catalog reference data.
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
    /// Manage users (product and wishlist owners)
    User {
        #[command(subcommand)]
        action: NamedAction,
    },

    /// Manage product categories
    Category {
        #[command(subcommand)]
        action: NamedAction,
    },

    /// Show catalog counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Create/list subcommands shared by users and categories.
#[derive(Subcommand)]
enum NamedAction {
    /// Create a new record
    Create {
        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all records
    List,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[derive(Clone, Copy)]
enum Kind {
    User,
    Category,
}

impl Kind {
    fn label(self) -> &'static str {
        match self {
            Kind::User => "user",
            Kind::Category => "category",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::User { action } => handle_named_action(Kind::User, action, &pool).await?,
        Commands::Category { action } => {
            handle_named_action(Kind::Category, action, &pool).await?
        }
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user and category commands.
async fn handle_named_action(kind: Kind, action: NamedAction, pool: &PgPool) -> Result<()> {
    let repo = PgReferenceRepository::new(Arc::new(pool.clone()));

    match action {
        NamedAction::Create { name, yes } => create_named(kind, &repo, name, yes).await,
        NamedAction::List => list_named(kind, &repo).await,
    }
}

/// Creates a user or category, prompting for the name when not provided.
async fn create_named(
    kind: Kind,
    repo: &PgReferenceRepository,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!(
        "{}",
        format!("Create {}", kind.label()).bright_blue().bold()
    );
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Name")
            .validate_with(|input: &String| {
                if input.trim().is_empty() {
                    Err("Name must not be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?,
    };
    let name = name.trim().to_string();
    if name.is_empty() {
        anyhow::bail!("Name must not be empty");
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create {} '{}'?", kind.label(), name))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let id = match kind {
        Kind::User => repo.create_user(&name).await.map(|u| u.id),
        Kind::Category => repo.create_category(&name).await.map(|c| c.id),
    }
    .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", kind.label(), e))?;

    println!();
    println!(
        "{} {} {}",
        "Created".green().bold(),
        kind.label(),
        format!("#{id}").bright_yellow().bold()
    );
    println!();

    Ok(())
}

/// Lists users or categories.
///
/// # Output Format
///
/// ```text
///   ID    Name                           Created
///   ─────────────────────────────────────────────────────────────
///   1     Ana                            2025-01-15 10:30
/// ```
async fn list_named(kind: Kind, repo: &PgReferenceRepository) -> Result<()> {
    let rows: Vec<(i64, String, String)> = match kind {
        Kind::User => repo
            .list_users()
            .await?
            .into_iter()
            .map(|u| (u.id, u.name, u.created_at.format("%Y-%m-%d %H:%M").to_string()))
            .collect(),
        Kind::Category => repo
            .list_categories()
            .await?
            .into_iter()
            .map(|c| (c.id, c.name, c.created_at.format("%Y-%m-%d %H:%M").to_string()))
            .collect(),
    };

    if rows.is_empty() {
        println!("{}", format!("  No {} records found", kind.label()).yellow());
        println!();
        println!(
            "  Create one with: {} admin {} create",
            "cargo run --bin".bright_cyan(),
            kind.label()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<30} {:<20}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    for (id, name, created) in &rows {
        println!(
            "  {:<5} {:<30} {}",
            id.to_string().bright_black(),
            name.cyan(),
            created.bright_black()
        );
    }

    println!();
    println!("  Total: {}", rows.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Displays row counts per table and how many products are published.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Catalog statistics".bright_blue().bold());
    println!();

    let counts: [(&str, &str); 5] = [
        ("Users", "SELECT COUNT(*) FROM users"),
        ("Categories", "SELECT COUNT(*) FROM categories"),
        ("Products", "SELECT COUNT(*) FROM products"),
        (
            "Published",
            "SELECT COUNT(*) FROM products WHERE status = 'published'",
        ),
        ("Wishlists", "SELECT COUNT(*) FROM wishlists"),
    ];

    for (label, sql) in counts {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(pool).await?;
        println!(
            "  {:<12} {}",
            format!("{label}:"),
            count.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM _sqlx_migrations WHERE success",
            )
            .fetch_one(pool)
            .await
            .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Applied migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
