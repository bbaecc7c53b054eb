//! CLI administration tool for movie-ratings.
//!
//! Loads the MovieLens data set, creates the critic account, and inspects
//! predictions without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Replace all data with a MovieLens-100k directory (u.user, u.item, u.data)
//! cargo run --bin admin -- seed --data-dir ./ml-100k
//!
//! # Create the critic account
//! cargo run --bin admin -- critic create
//!
//! # Show the detail view user 1 would get for movie 50
//! cargo run --bin admin -- predict --user 1 --movie 50
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
//! - `DATABASE_URL` or `DB_*` components (required)
//! - `SESSION_SIGNING_SECRET` (required by `critic create`)
//! - `CRITIC_EMAIL` (optional, default `the-eye@of-judgment.com`)
//! - `SINGLE_OVERLAP_DISAGREEMENT` (optional, used by `predict`)

use movie_ratings::application::services::{AuthService, Registration};
use movie_ratings::config::{Config, DEFAULT_CRITIC_EMAIL};
use movie_ratings::domain::scoring::{EngineConfig, SINGLE_OVERLAP_DISAGREEMENT};
use movie_ratings::infrastructure::persistence::{
    PgMovieRepository, PgRatingRepository, PgSessionRepository, PgUserRepository,
};
use movie_ratings::server::resolve_critic;
use movie_ratings::state::{AppState, Repositories};
use movie_ratings::utils::credentials::generate_password;
use movie_ratings::utils::movielens::{self, SeedMovie, SeedRating, SeedUser};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// CLI tool for managing movie-ratings.
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
    /// Replace all data with a MovieLens data set
    Seed {
        /// Directory containing u.user, u.item and u.data
        #[arg(short, long)]
        data_dir: PathBuf,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Manage the critic account
    Critic {
        #[command(subcommand)]
        action: CriticAction,
    },

    /// Show the detail view a user gets for a movie
    Predict {
        #[arg(short, long)]
        user: i64,

        #[arg(short, long)]
        movie: i64,
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
enum CriticAction {
    /// Create the critic account with a generated password
    Create {
        /// Critic email (defaults to CRITIC_EMAIL)
        #[arg(short, long)]
        email: Option<String>,

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

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    match cli.command {
        Commands::Seed { data_dir, yes } => seed(&pool, &data_dir, yes).await?,
        Commands::Critic { action } => match action {
            CriticAction::Create { email, yes } => create_critic(&pool, email, yes).await?,
        },
        Commands::Predict { user, movie } => predict(&pool, user, movie).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn critic_email() -> String {
    std::env::var("CRITIC_EMAIL").unwrap_or_else(|_| DEFAULT_CRITIC_EMAIL.to_string())
}

fn read_data_file(dir: &Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    let bytes = std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    // Latin-1: every byte maps to the code point of the same value
    Ok(bytes.iter().map(|&b| char::from(b)).collect())
}

/// Replaces users, movies and ratings with a MovieLens-100k data set.
///
/// # Flow
///
/// 1. Parse `u.user`, `u.item`, `u.data` (fails before touching the database)
/// 2. Confirm (unless `--yes`)
/// 3. In one transaction: truncate, insert with the data set's ids, reset
///    id sequences
///
/// Imported users have no email or password and cannot log in.
async fn seed(pool: &PgPool, data_dir: &Path, skip_confirm: bool) -> Result<()> {
    println!("{}", "🌱 Seed MovieLens data".bright_blue().bold());
    println!();

    let users = movielens::parse_users(&read_data_file(data_dir, "u.user")?)
        .context("Invalid u.user")?;
    let movies = movielens::parse_movies(&read_data_file(data_dir, "u.item")?)
        .context("Invalid u.item")?;
    let ratings = movielens::parse_ratings(&read_data_file(data_dir, "u.data")?)
        .context("Invalid u.data")?;

    println!("  Users:   {}", users.len().to_string().cyan());
    println!("  Movies:  {}", movies.len().to_string().cyan());
    println!("  Ratings: {}", ratings.len().to_string().cyan());
    println!();
    println!(
        "{}",
        "⚠️  All existing users, movies, ratings and sessions will be deleted."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Replace existing data?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let mut tx = pool.begin().await?;

    sqlx::query("TRUNCATE sessions, ratings, movies, users RESTART IDENTITY CASCADE")
        .execute(&mut *tx)
        .await?;

    insert_users(&mut tx, &users).await?;
    insert_movies(&mut tx, &movies).await?;
    insert_ratings(&mut tx, &ratings).await?;

    for table in ["users", "movies"] {
        sqlx::query(&format!(
            "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
             COALESCE((SELECT MAX(id) FROM {table}), 0) + 1, false)"
        ))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    println!("{}", "✅ Data seeded successfully!".green().bold());
    println!();
    println!(
        "  Create the critic next: {} admin critic create",
        "cargo run --bin".bright_cyan()
    );
    println!();

    Ok(())
}

async fn insert_users(tx: &mut sqlx::PgConnection, users: &[SeedUser]) -> Result<()> {
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    let ages: Vec<Option<i32>> = users.iter().map(|u| u.age).collect();
    let zipcodes: Vec<Option<String>> = users.iter().map(|u| u.zipcode.clone()).collect();

    sqlx::query(
        r#"
        INSERT INTO users (id, age, zipcode)
        SELECT * FROM UNNEST($1::bigint[], $2::int[], $3::text[])
        "#,
    )
    .bind(ids)
    .bind(ages)
    .bind(zipcodes)
    .execute(tx)
    .await
    .context("Failed to insert users")?;

    Ok(())
}

async fn insert_movies(tx: &mut sqlx::PgConnection, movies: &[SeedMovie]) -> Result<()> {
    let ids: Vec<i64> = movies.iter().map(|m| m.id).collect();
    let titles: Vec<String> = movies.iter().map(|m| m.title.clone()).collect();
    let released: Vec<Option<chrono::NaiveDate>> = movies.iter().map(|m| m.released_at).collect();
    let urls: Vec<Option<String>> = movies.iter().map(|m| m.imdb_url.clone()).collect();

    sqlx::query(
        r#"
        INSERT INTO movies (id, title, released_at, imdb_url)
        SELECT * FROM UNNEST($1::bigint[], $2::text[], $3::date[], $4::text[])
        "#,
    )
    .bind(ids)
    .bind(titles)
    .bind(released)
    .bind(urls)
    .execute(tx)
    .await
    .context("Failed to insert movies")?;

    Ok(())
}

/// Inserts ratings; a repeated (user, movie) pair keeps the last score.
async fn insert_ratings(tx: &mut sqlx::PgConnection, ratings: &[SeedRating]) -> Result<()> {
    let user_ids: Vec<i64> = ratings.iter().map(|r| r.user_id).collect();
    let movie_ids: Vec<i64> = ratings.iter().map(|r| r.movie_id).collect();
    let scores: Vec<i32> = ratings.iter().map(|r| r.score).collect();

    sqlx::query(
        r#"
        INSERT INTO ratings (user_id, movie_id, score)
        SELECT DISTINCT ON (user_id, movie_id) user_id, movie_id, score
        FROM UNNEST($1::bigint[], $2::bigint[], $3::int[])
            WITH ORDINALITY AS r(user_id, movie_id, score, n)
        ORDER BY user_id, movie_id, n DESC
        "#,
    )
    .bind(user_ids)
    .bind(movie_ids)
    .bind(scores)
    .execute(tx)
    .await
    .context("Failed to insert ratings")?;

    Ok(())
}

/// Creates the critic account and prints its generated password once.
async fn create_critic(pool: &PgPool, email: Option<String>, skip_confirm: bool) -> Result<()> {
    println!("{}", "🎬 Create Critic Account".bright_blue().bold());
    println!();

    let signing_secret = std::env::var("SESSION_SIGNING_SECRET")
        .context("SESSION_SIGNING_SECRET must be set to create accounts")?;

    let email = match email {
        Some(e) => e,
        None => Input::new()
            .with_prompt("Critic email")
            .with_initial_text(critic_email())
            .interact_text()?,
    };

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create critic account {email}?"))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let pool = Arc::new(pool.clone());
    let auth = AuthService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgSessionRepository::new(pool)),
        signing_secret,
    );

    let password = generate_password();
    let user = auth
        .register(Registration {
            email: email.clone(),
            password: password.clone(),
            age: None,
            zipcode: None,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create critic: {}", e))?;

    println!();
    println!("{}", "✅ Critic created successfully!".green().bold());
    println!();
    println!("  ID:       {}", user.id.to_string().bright_black());
    println!("  Email:    {}", email.cyan());
    println!("  Password: {}", password.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this password now! You won't be able to see it again."
            .red()
            .bold()
    );
    if !email.eq_ignore_ascii_case(&critic_email()) {
        println!();
        println!(
            "{}",
            format!("⚠️  Set CRITIC_EMAIL={email} so the server picks this account up.").yellow()
        );
    }
    println!();

    Ok(())
}

/// Prints the detail view `user` gets for `movie`.
async fn predict(pool: &PgPool, user_id: i64, movie_id: i64) -> Result<()> {
    println!("{}", "🔮 Movie Detail".bright_blue().bold());
    println!();

    let disagreement = match std::env::var("SINGLE_OVERLAP_DISAGREEMENT") {
        Ok(raw) => raw
            .trim()
            .parse()
            .context("SINGLE_OVERLAP_DISAGREEMENT must be a number")?,
        Err(_) => SINGLE_OVERLAP_DISAGREEMENT,
    };

    let pool = Arc::new(pool.clone());
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let critic_id = resolve_critic(&*users, &critic_email()).await?;

    let state = AppState::new(
        Repositories {
            users,
            movies: Arc::new(PgMovieRepository::new(pool.clone())),
            ratings: Arc::new(PgRatingRepository::new(pool.clone())),
            sessions: Arc::new(PgSessionRepository::new(pool)),
        },
        EngineConfig::new(disagreement, critic_id),
        String::new(),
    );

    let (movie, detail) = state
        .movie_service
        .detail(Some(user_id), movie_id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let dash = || "-".bright_black().to_string();

    println!("  Movie:     {} {}", movie.title.cyan(), format!("#{}", movie.id).bright_black());
    println!(
        "  Ratings:   {}",
        detail.rating_count.to_string().bright_white()
    );
    println!(
        "  Average:   {}",
        detail
            .average
            .map(|a| format!("{a:.2}").bright_green().to_string())
            .unwrap_or_else(dash)
    );

    for (label, effective) in [
        ("User", detail.viewer_effective),
        ("Critic", detail.critic_effective),
    ] {
        let value = match effective {
            Some(e) if e.is_predicted() => format!("{} (predicted)", e.score()).yellow().to_string(),
            Some(e) => e.score().to_string().bright_green().to_string(),
            None => dash(),
        };
        println!("  {:<10} {}", format!("{label}:"), value);
    }

    println!(
        "  Deviation: {}",
        detail
            .deviation
            .map(|d| d.to_string().bright_white().to_string())
            .unwrap_or_else(dash)
    );
    if let Some(message) = detail.message {
        println!();
        println!("  {}", message.italic());
    }
    println!();

    Ok(())
}

/// Displays user, movie and rating counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let accounts_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email IS NOT NULL")
            .fetch_one(pool)
            .await?;

    let movies_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
        .fetch_one(pool)
        .await?;

    let ratings_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ratings")
        .fetch_one(pool)
        .await?;

    let critic: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE lower(email) = lower($1)")
        .bind(critic_email())
        .fetch_optional(pool)
        .await?;

    println!(
        "  Users:    {} ({} with accounts)",
        users_count.to_string().bright_green().bold(),
        accounts_count.to_string().bright_white()
    );
    println!(
        "  Movies:   {}",
        movies_count.to_string().bright_green().bold()
    );
    println!(
        "  Ratings:  {}",
        ratings_count.to_string().bright_green().bold()
    );
    match critic {
        Some(id) => println!("  Critic:   {}", format!("user #{id}").bright_green()),
        None => println!("  Critic:   {}", "not created".yellow()),
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

            let size: String =
                sqlx::query_scalar("SELECT pg_size_pretty(pg_database_size(current_database()))")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Size:       {}", size.bright_white());
            println!();
        }
    }

    Ok(())
}
