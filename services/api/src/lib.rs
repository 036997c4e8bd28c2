mod cli;
mod infra;
mod preview;
mod routes;
mod server;

use salon_booking::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
