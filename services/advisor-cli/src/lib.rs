mod cli;
mod demo;
mod infra;
mod render;

use stack_advisor::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
