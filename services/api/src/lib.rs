mod cli;
mod hunt;
mod infra;
mod routes;
mod server;

use side_quest::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
