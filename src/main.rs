//! Career Chat Backend - Main Entry Point
//!
//! Starts the web API server for the Career Guidance Chat Assistant.

use career_chat::{api::run_server, AppError, Config};

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    // A missing .env file is fine; real env vars still apply
    let _ = dotenvy::dotenv();

    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env()?;
    run_server(config).await
}
