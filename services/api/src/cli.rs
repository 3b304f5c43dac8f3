use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use mentor_hub::auth::{AuthState, Role};
use mentor_hub::config::AppConfig;
use mentor_hub::error::AppError;
use mentor_hub::workflows::progress::UserId;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(
    name = "Mentor Hub",
    about = "Run the mentorship progress service or exercise it from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk a synthetic mentee through every milestone against in-memory stores
    Demo(DemoArgs),
    /// Mint a bearer token signed with the configured secret
    Token(TokenArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct TokenArgs {
    /// Account id the token is issued for
    #[arg(long)]
    pub(crate) user: Uuid,
    /// Grant the admin role
    #[arg(long)]
    pub(crate) admin: bool,
    /// Email recorded in the token claims
    #[arg(long)]
    pub(crate) email: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
        Command::Token(args) => run_token(args),
    }
}

fn run_token(args: TokenArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let token = mint_token(&AuthState::new(&config.auth), &args)?;
    println!("{token}");
    Ok(())
}

pub(crate) fn mint_token(auth: &AuthState, args: &TokenArgs) -> Result<String, AppError> {
    let role = if args.admin { Role::Admin } else { Role::User };
    Ok(auth.issue_token(&UserId(args.user), role, args.email.as_deref())?)
}
