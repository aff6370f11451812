use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use rms_auth::Role;
use rms_config::DatabaseConfig;
use rms_core::errors::{conflict_or_database, format_validation_errors};
use rms_core::hash_password;
use rms_db::{PgPool, init_db_pool, with_transaction};
use rms_models::{CreateSubAdminDto, UserId};
use validator::Validate;

#[derive(Parser)]
#[command(name = "rms-cli")]
#[command(about = "RMS CLI - Administrative tools for the RMS API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin account. Admins cannot be created over HTTP.
    CreateAdmin {
        /// Display name (letters and spaces)
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(&pool, name, email, password).await,
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Name")
            .interact_text()
            .context("Failed to read name")?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    // Same rules as a sub-admin created over HTTP.
    let input = CreateSubAdminDto {
        name,
        email,
        password,
    };
    if let Err(errors) = input.validate() {
        bail!("{}", format_validation_errors(&errors));
    }

    match create_admin(pool, &input).await {
        Ok(id) => {
            println!("\n✅ Admin created successfully!");
            println!("   Id: {}", id);
            println!("   Email: {}", input.email);
            println!("   Name: {}", input.name);
            Ok(())
        }
        Err(e) => bail!("Error creating admin: {}", e.error),
    }
}

/// Inserts an admin that records itself as its creator.
async fn create_admin(
    db: &PgPool,
    input: &CreateSubAdminDto,
) -> Result<UserId, rms_core::AppError> {
    let password_hash = hash_password(&input.password)?;
    let name = input.name.clone();
    let email = input.email.clone();

    with_transaction(db, "create_admin", move |tx| {
        Box::pin(async move {
            let id = UserId::new();

            sqlx::query(
                r#"
                INSERT INTO users (id, name, email, password, role, created_by)
                VALUES ($1, $2, $3, $4, $5, $1)
                "#,
            )
            .bind(id)
            .bind(&name)
            .bind(&email)
            .bind(&password_hash)
            .bind(Role::Admin)
            .execute(&mut **tx)
            .await
            .map_err(|e| conflict_or_database(e, "User already exists", "Failed to insert admin"))?;

            Ok(id)
        })
    })
    .await
}
