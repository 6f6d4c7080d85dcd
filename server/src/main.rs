mod config;
mod db;
mod error;
mod routes;
mod services;
mod state;

use std::process::ExitCode;
use std::sync::Arc;

use config::ServerConfig;
use services::password::Passwords;
use services::pg_store::PgStore;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let pool = match db::init_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "database init failed");
            return ExitCode::FAILURE;
        }
    };

    let passwords = match Passwords::with_defaults() {
        Ok(passwords) => passwords,
        Err(e) => {
            tracing::error!(error = %e, "password hasher init failed");
            return ExitCode::FAILURE;
        }
    };

    let store = Arc::new(PgStore::new(pool));
    let state = state::AppState::new(store.clone(), store, passwords, config.session);
    let app = routes::app(state, &config.cors_origins);

    let port = config.port;
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %port, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%port, "inventory api listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
