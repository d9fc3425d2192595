mod cli;
mod infra;
mod routes;
mod server;

use portfolio::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
