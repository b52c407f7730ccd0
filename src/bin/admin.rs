//! CLI administration tool for jtrac accounts.
//!
//! Creates users, resets passwords and runs database maintenance without
//! going through the web interface.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for missing values)
//! cargo run --bin admin -- user create --login alice --name "Alice Smith"
//!
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # Reset a password
//! cargo run --bin admin -- user passwd alice
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `PASSWORD_ENCODER_SECRET` (required for `user create` / `user passwd`):
//!   must match the value the server runs with, otherwise stored passwords
//!   will never match at login

use jtrac::application::services::{AuthService, PasswordEncoder};
use jtrac::domain::entities::UserRegistration;
use jtrac::domain::repositories::UserRepository;
use jtrac::infrastructure::persistence::PgUserRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing jtrac users.
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
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login name (letters, digits, `.`, `_`, `@`, `-`)
        #[arg(short, long)]
        login: Option<String>,

        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// Email address
        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,

    /// Set a new password for a user
    Passwd {
        /// Login name of the user
        login: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
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
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Builds the same authentication service the server uses.
fn auth_service(pool: &PgPool) -> Result<AuthService<PgUserRepository>> {
    let secret = std::env::var("PASSWORD_ENCODER_SECRET")
        .context("PASSWORD_ENCODER_SECRET must be set")?;
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));
    Ok(AuthService::new(repo, PasswordEncoder::new(secret)))
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    match action {
        UserAction::Create {
            login,
            name,
            email,
            yes,
        } => create_user(&auth_service(pool)?, login, name, email, yes).await?,
        UserAction::List => {
            let repo = PgUserRepository::new(Arc::new(pool.clone()));
            list_users(&repo).await?;
        }
        UserAction::Passwd { login } => change_password(&auth_service(pool)?, &login).await?,
    }

    Ok(())
}

/// Creates a user with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for login name and display name (or use provided)
/// 2. Prompt for the password twice
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Validate, encode the password and store the user
async fn create_user(
    service: &AuthService<PgUserRepository>,
    login: Option<String>,
    name: Option<String>,
    email: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let login_name = match login {
        Some(l) => l,
        None => Input::new().with_prompt("Login name").interact_text()?,
    };

    let display_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Display name")
            .with_initial_text(login_name.clone())
            .interact_text()?,
    };

    let password = prompt_new_password()?;

    println!();
    println!("{}", "User details:".bright_white().bold());
    println!("  Login: {}", login_name.cyan());
    println!("  Name:  {}", display_name.cyan());
    if let Some(email) = &email {
        println!("  Email: {}", email.cyan());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let registration = UserRegistration {
        login_name,
        name: display_name,
        email,
        password,
    };

    let user = service
        .register(&registration)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ User created:".green().bold(),
        user.login_name.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all users.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID  Login                Name                           Created
///   ────────────────────────────────────────────────────────────────────────
///   1   alice                Alice Smith                    2024-01-15 10:30
/// ```
async fn list_users(repo: &PgUserRepository) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = repo
        .list_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<30} {:<20}",
        "ID".bright_white().bold(),
        "Login".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for user in &users {
        println!(
            "  {:<3} {:<20} {:<30} {}",
            user.id.to_string().bright_black(),
            user.login_name.cyan(),
            user.name,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Resets a user's password.
///
/// Existing remember-me cookies for the user stop working, since they carry
/// the previous encoded password.
async fn change_password(service: &AuthService<PgUserRepository>, login: &str) -> Result<()> {
    println!("{}", "🔒 Change Password".bright_blue().bold());
    println!();
    println!("  User: {}", login.cyan());
    println!();

    let password = prompt_new_password()?;

    service
        .change_password(login, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to change password: {}", e))?;

    println!();
    println!("{}", "✅ Password changed successfully!".green().bold());
    println!();

    Ok(())
}

fn prompt_new_password() -> Result<String> {
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;
    Ok(password)
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations").run(pool).await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
