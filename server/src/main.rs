use std::process::ExitCode;

use tokio::net::TcpListener;
use todo_server::{ServerConfig, Storage};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "configuration error");
            return ExitCode::FAILURE;
        }
    };

    let storage = match Storage::open(&config.database).await {
        Ok(storage) => storage,
        Err(err) => {
            tracing::error!(%err, url = %config.database.url, "failed to open database");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(url = %config.database.url, "connected to database");

    let addr = config.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%err, %addr, "failed to bind");
            storage.close().await;
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(%addr, "listening");

    let result = todo_server::run(listener, storage.clone(), todo_server::shutdown_signal()).await;
    storage.close().await;

    match result {
        Ok(()) => {
            tracing::info!("server stopped");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "server error");
            ExitCode::FAILURE
        }
    }
}
