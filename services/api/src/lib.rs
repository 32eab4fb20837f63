mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use crisis_rescue::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
