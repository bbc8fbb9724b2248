use std::sync::Arc;

use clap::{Args, Subcommand};
use souk_app::{
    auth::{PgAuthRepository, PgAuthService},
    database,
};

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    Create(CreateUserArgs),
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    /// Email address for the new user
    #[arg(long)]
    email: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create_user(args).await,
    }
}

async fn create_user(args: CreateUserArgs) -> Result<(), String> {
    if args.email.trim().is_empty() {
        return Err("email cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(Arc::new(PgAuthRepository::new(pool)));

    let registered = service
        .register_user(args.email)
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", registered.user.uuid);
    println!("email: {}", registered.user.email);
    println!("api_token: {}", registered.api_token);
    println!("store this token now; it is only shown once");

    Ok(())
}
