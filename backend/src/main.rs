//! Hyperlocal Intelligence Platform - Backend Server
//!
//! Serves the location, trigger, alert and forecast API and runs the
//! parametric monitor alongside it on the same runtime.

use std::{net::SocketAddr, sync::Arc};

use hyperlocal_backend::{
    config,
    external::{WeatherClient, WeatherSource},
    services::{NotificationService, ParametricMonitor},
    store::{InMemoryStore, Store},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "hli_server=debug,hyperlocal_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Hyperlocal Intelligence Platform");
    tracing::info!("Environment: {}", config.environment);

    if config.weather.api_key.is_empty() {
        tracing::warn!("Weather API key not configured; weather fetches will fail");
    }

    let store: Arc<dyn Store> = Arc::new(InMemoryStore::new());
    let weather: Arc<dyn WeatherSource> = Arc::new(WeatherClient::with_base_url(
        config.weather.api_key.clone(),
        config.weather.api_endpoint.clone(),
    ));
    let notifications = Arc::new(NotificationService::from_webhook(
        config.notification.webhook_url.clone(),
    ));
    tracing::info!("Alert notifiers: {:?}", notifications.notifier_names());

    let monitor = Arc::new(ParametricMonitor::new(
        store.clone(),
        weather.clone(),
        notifications,
        &config.monitor,
    ));
    if config.monitor.autostart {
        monitor.start();
    }

    // Create application state
    let state = AppState {
        store,
        weather,
        monitor: monitor.clone(),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = hyperlocal_backend::create_app(state);

    // Start server
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    monitor.stop().await;
    tracing::info!("Server shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
