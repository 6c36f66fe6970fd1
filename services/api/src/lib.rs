mod cli;
mod form;
mod infra;
mod quote;
mod routes;
mod server;

use contract_payout::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
