//! CLI administration tool for foodgram.
//!
//! Provides commands for loading the ingredient catalogue, managing tags,
//! viewing statistics, and performing database checks without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Load ingredients from the bundled CSV
//! cargo run --bin admin -- ingredients load
//!
//! # Load from another file
//! cargo run --bin admin -- ingredients load --path /tmp/ingredients.csv
//!
//! # Create a tag
//! cargo run --bin admin -- tags create --name Dessert --slug dessert
//!
//! # List tags
//! cargo run --bin admin -- tags list
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

use foodgram::application::services::{IngredientService, TagService};
use foodgram::domain::entities::tag::is_valid_slug;
use foodgram::infrastructure::persistence::{PgIngredientRepository, PgTagRepository};
use foodgram::utils::ingredient_csv::parse_ingredients;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for managing foodgram.
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
    /// Manage the ingredient catalogue
    Ingredients {
        #[command(subcommand)]
        action: IngredientAction,
    },

    /// Manage recipe tags
    Tags {
        #[command(subcommand)]
        action: TagAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum IngredientAction {
    /// Load ingredients from a headerless `name,unit` CSV file
    Load {
        /// Path to the CSV file
        #[arg(short, long, default_value = "data/ingredients.csv")]
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum TagAction {
    /// Create a new tag
    Create {
        /// Display name (e.g., "Breakfast")
        #[arg(short, long)]
        name: Option<String>,

        /// URL slug (e.g., "breakfast")
        #[arg(short, long)]
        slug: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tags
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

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Ingredients { action } => handle_ingredient_action(action, &pool).await?,
        Commands::Tags { action } => handle_tag_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_ingredient_action(action: IngredientAction, pool: &PgPool) -> Result<()> {
    let service = IngredientService::new(Arc::new(PgIngredientRepository::new(Arc::new(
        pool.clone(),
    ))));

    match action {
        IngredientAction::Load { path } => load_ingredients(&service, path).await?,
    }

    Ok(())
}

/// Loads ingredients from CSV.
///
/// # Flow
///
/// 1. Parse every row, collecting malformed ones instead of failing
/// 2. Report rejected rows with their line numbers
/// 3. Bulk insert, skipping (name, unit) pairs that already exist
/// 4. Print how many rows were read and inserted
async fn load_ingredients(
    service: &IngredientService<PgIngredientRepository>,
    path: PathBuf,
) -> Result<()> {
    println!("{}", "🥕 Load Ingredients".bright_blue().bold());
    println!();

    let file = File::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
    let parsed = parse_ingredients(file);

    for rejected in &parsed.rejected {
        println!(
            "  {} line {}: {}",
            "skipped".yellow(),
            rejected.line.to_string().bright_black(),
            rejected.reason
        );
    }

    let read = parsed.ingredients.len();
    let inserted = service
        .load(parsed.ingredients)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load ingredients: {}", e))?;

    println!();
    println!("  Read:     {}", read.to_string().bright_white().bold());
    println!("  Inserted: {}", inserted.to_string().bright_green().bold());
    println!(
        "  Existing: {}",
        (read as u64).saturating_sub(inserted).to_string().bright_black()
    );
    println!(
        "  Rejected: {}",
        parsed.rejected.len().to_string().yellow()
    );
    println!();
    println!("{}", "✅ Ingredients loaded".green().bold());

    Ok(())
}

async fn handle_tag_action(action: TagAction, pool: &PgPool) -> Result<()> {
    let service = TagService::new(Arc::new(PgTagRepository::new(Arc::new(pool.clone()))));

    match action {
        TagAction::Create { name, slug, yes } => create_tag(&service, name, slug, yes).await?,
        TagAction::List => list_tags(&service).await?,
    }

    Ok(())
}

/// Creates a tag with interactive prompts for missing values.
async fn create_tag(
    service: &TagService<PgTagRepository>,
    name: Option<String>,
    slug: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🏷  Create Tag".bright_blue().bold());
    println!();

    let tag_name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Tag name").interact_text()?,
    };

    let tag_slug = match slug {
        Some(s) => s,
        None => Input::new()
            .with_prompt("Slug")
            .with_initial_text(tag_name.to_lowercase().replace(' ', "-"))
            .validate_with(|input: &String| {
                if is_valid_slug(input) {
                    Ok(())
                } else {
                    Err("Use letters, digits, '-' and '_' only")
                }
            })
            .interact_text()?,
    };

    println!();
    println!("  Name: {}", tag_name.cyan());
    println!("  Slug: {}", tag_slug.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this tag?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let tag = service
        .create(&tag_name, &tag_slug)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create tag: {}", e))?;

    println!(
        "{} (id {})",
        "✅ Tag created".green().bold(),
        tag.id.to_string().bright_white()
    );

    Ok(())
}

/// Lists tags ordered by name.
///
/// # Output Format
///
/// ```text
/// 📋 Tags
///
///   ID  Name                 Slug
///   ──────────────────────────────────────────
///   1   Breakfast            breakfast
/// ```
async fn list_tags(service: &TagService<PgTagRepository>) -> Result<()> {
    println!("{}", "📋 Tags".bright_blue().bold());
    println!();

    let tags = service
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tags: {}", e))?;

    if tags.is_empty() {
        println!("{}", "  No tags found".yellow());
        println!();
        println!(
            "  Create one with: {} admin tags create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<20} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Slug".bright_white().bold()
    );
    println!("  {}", "─".repeat(42).bright_black());

    for tag in &tags {
        println!(
            "  {:<4} {:<20} {}",
            tag.id.to_string().bright_black(),
            tag.name.cyan(),
            tag.slug
        );
    }

    println!();
    println!("  Total: {}", tags.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Displays row counts of the main tables.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    for (label, table) in [
        ("Users", "users"),
        ("Recipes", "recipes"),
        ("Tags", "tags"),
        ("Ingredients", "ingredients"),
        ("Subscriptions", "follows"),
    ] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await?;

        println!(
            "  {:<14} {}",
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

            let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", applied.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
