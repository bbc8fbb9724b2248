use std::sync::Arc;

use clap::{Args, Subcommand};
use souk_app::{
    auth::{PgAuthRepository, PgAuthService, models::UserUuid},
    database,
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    Issue(IssueTokenArgs),
}

#[derive(Debug, Args)]
struct IssueTokenArgs {
    /// User UUID that should own the token
    #[arg(long)]
    user_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    match command.command {
        TokenSubcommand::Issue(args) => issue_token(args).await,
    }
}

async fn issue_token(args: IssueTokenArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(Arc::new(PgAuthRepository::new(pool)));

    let api_token = service
        .issue_api_token(UserUuid::from_uuid(args.user_uuid))
        .await
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("user_uuid: {}", args.user_uuid);
    println!("api_token: {api_token}");
    println!("store this token now; it is only shown once");

    Ok(())
}
