mod cli;
mod commands;

use creativehub_risk::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
