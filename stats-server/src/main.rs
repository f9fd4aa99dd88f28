mod config;
mod error;
mod routes;
mod state;

use eyre::WrapErr;
use minestats_http_client::WebhookClient;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Stats server starting...");

    let config = config::Config::from_env().wrap_err("Failed to load stats server config")?;
    tracing::info!(
        "Upstream webhooks at {} (timeout {}s), dashboard timezone {}",
        config.webhook.base_url,
        config.webhook.timeout_secs,
        config.clock.tz
    );

    let webhook = WebhookClient::new(&config.webhook).wrap_err("initialize webhook client")?;

    let app_state = state::AppState {
        webhook,
        clock: config.clock,
    };

    let app = routes::create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err("Failed to bind to address")?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("install SIGTERM handler");
    tokio::select! {
        _ = sigterm.recv() => {},
        _ = tokio::signal::ctrl_c() => {},
    }
}
