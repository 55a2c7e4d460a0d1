//! hr-server binary
//!
//! Loads configuration, runs migrations, starts the audit worker and
//! serves the HTTP API.

use hr_server::{AppState, BoxError, Config, api, logger};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    logger::init_logger();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            return Err(e);
        }
    };

    tracing::info!("Starting hr-server (env: {})", config.environment);
    if config.is_development() && std::env::var("JWT_SECRET").is_err() {
        tracing::warn!("JWT_SECRET not set, using the development default");
    }

    let (state, audit_worker) = AppState::connect(&config).await?;
    sqlx::migrate!("./migrations").run(&state.pool).await?;

    let worker_handle = tokio::spawn(audit_worker.run());

    // Periodic rate limiter cleanup (every 5 minutes)
    let rate_limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(300));
        loop {
            interval.tick().await;
            rate_limiter.cleanup().await;
        }
    });

    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("hr-server HTTP listening on {http_addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router owned the last AuditService handles; the worker drains and exits.
    if let Err(e) = worker_handle.await {
        tracing::error!("Audit worker terminated abnormally: {e}");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutdown signal received");
}
