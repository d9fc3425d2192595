use crate::server;
use clap::{Args, Parser, Subcommand};
use portfolio::config::AppConfig;
use portfolio::contact::{SqliteSubmissionRepository, SubmissionRepository};
use portfolio::error::AppError;
use portfolio::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Portfolio Site",
    about = "Serve the portfolio site and manage its contact store",
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
    /// Create the contacts table if it does not exist and exit
    Migrate,
    /// Print how many contact submissions are stored
    Stats,
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

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Migrate => run_migrate().await,
        Command::Stats => run_stats().await,
    }
}

async fn open_store() -> Result<SqliteSubmissionRepository, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let repository = SqliteSubmissionRepository::connect(&config.database.url).await?;
    repository.migrate().await?;
    Ok(repository)
}

async fn run_migrate() -> Result<(), AppError> {
    let repository = open_store().await?;
    repository.close().await;
    println!("contacts table ready");
    Ok(())
}

async fn run_stats() -> Result<(), AppError> {
    let repository = open_store().await?;
    let total = repository.count().await?;
    repository.close().await;
    println!("stored contact submissions: {total}");
    Ok(())
}
