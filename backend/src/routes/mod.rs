//! Route definitions for the Hyperlocal Intelligence Platform

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/locations", location_routes())
        .nest("/triggers", trigger_routes())
        .nest("/alerts", alert_routes())
        .nest("/forecast", forecast_routes())
}

/// Insured location routes
fn location_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_locations).post(handlers::create_location),
        )
        .route("/:location_id", get(handlers::get_location))
        .route("/:location_id/policies", post(handlers::add_location_policy))
}

/// Parametric trigger routes
fn trigger_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_trigger))
        .route("/:trigger_id", get(handlers::get_trigger))
        .route("/:trigger_id/toggle", patch(handlers::toggle_trigger))
        .route(
            "/location/:location_id",
            get(handlers::list_location_triggers),
        )
}

/// Alert routes
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_alerts))
        .route("/:alert_id", get(handlers::get_alert))
        .route("/:alert_id/resolve", patch(handlers::resolve_alert))
        .route(
            "/location/:location_id",
            get(handlers::list_location_alerts),
        )
}

/// Forecast routes
fn forecast_routes() -> Router<AppState> {
    Router::new()
        .route("/:location_id", get(handlers::get_forecast))
        .route("/:location_id/current", get(handlers::get_current_weather))
}
