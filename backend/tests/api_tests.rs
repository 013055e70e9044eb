//! HTTP API tests
//!
//! Drives the full router in-process for:
//! - Location registration and lookup
//! - Trigger registration, validation and toggling
//! - Alert listing and resolution
//! - Scored forecasts and the error envelope

mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use common::{forecast_point, location, monitor_config, reading, trigger, FakeWeather};
use hyperlocal_backend::{
    config::{Config, NotificationConfig, ServerConfig, WeatherConfig},
    create_app,
    services::{risk_engine::create_alert, NotificationService, ParametricMonitor},
    store::{InMemoryStore, Store},
    AppState,
};
use serde_json::{json, Value};
use shared::{Location, ThresholdOperator, TriggerCategory};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    router: Router,
    store: Arc<InMemoryStore>,
    weather: Arc<FakeWeather>,
}

fn test_app() -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let weather = Arc::new(FakeWeather::new());
    let config = Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        weather: WeatherConfig {
            api_endpoint: "http://localhost:0".to_string(),
            api_key: "test-key".to_string(),
        },
        monitor: monitor_config(),
        notification: NotificationConfig::default(),
    };
    let monitor = ParametricMonitor::new(
        store.clone(),
        weather.clone(),
        Arc::new(NotificationService::new()),
        &config.monitor,
    );
    let state = AppState {
        store: store.clone(),
        weather: weather.clone(),
        monitor: Arc::new(monitor),
        config: Arc::new(config),
    };

    TestApp {
        router: create_app(state),
        store,
        weather,
    }
}

async fn send(app: &TestApp, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn seeded_location(app: &TestApp) -> Location {
    let loc = location("Ayutthaya");
    app.store.insert_location(loc.clone()).unwrap();
    loc
}

// ============================================================================
// Health Tests
// ============================================================================

#[cfg(test)]
mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_monitor_state() {
        let app = test_app();
        let (status, body) = send(&app, Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["environment"], "test");
        assert_eq!(body["monitor"], "stopped");
        assert_eq!(body["sweeps_completed"], 0);
    }

    #[tokio::test]
    async fn test_root() {
        let app = test_app();
        let (status, body) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "Hyperlocal Intelligence Platform");
    }
}

// ============================================================================
// Location Tests
// ============================================================================

#[cfg(test)]
mod location_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_fetch_location() {
        let app = test_app();
        let (status, created) = send(
            &app,
            Method::POST,
            "/api/locations",
            Some(json!({
                "latitude": 18.7883,
                "longitude": 98.9853,
                "name": "Chiang Mai Warehouse",
                "insurer_id": "insurer-7",
                "policy_ids": ["POL-100"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["name"], "Chiang Mai Warehouse");

        let id = created["id"].as_str().unwrap();
        let (status, fetched) = send(&app, Method::GET, &format!("/api/locations/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["insurer_id"], "insurer-7");
        assert_eq!(fetched["policy_ids"], json!(["POL-100"]));
    }

    #[tokio::test]
    async fn test_create_location_rejects_bad_latitude() {
        let app = test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/locations",
            Some(json!({
                "latitude": 123.0,
                "longitude": 98.9,
                "name": "Nowhere",
                "insurer_id": "insurer-7"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], "latitude");
    }

    #[tokio::test]
    async fn test_list_locations_filters_by_insurer() {
        let app = test_app();
        seeded_location(&app);
        let mut other = location("Khon Kaen");
        other.insurer_id = "insurer-2".to_string();
        app.store.insert_location(other).unwrap();

        let (_, all) = send(&app, Method::GET, "/api/locations", None).await;
        assert_eq!(all.as_array().unwrap().len(), 2);

        let (_, filtered) = send(&app, Method::GET, "/api/locations?insurer_id=insurer-2", None).await;
        let filtered = filtered.as_array().unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0]["name"], "Khon Kaen");
    }

    #[tokio::test]
    async fn test_add_policy_is_deduplicated() {
        let app = test_app();
        let loc = seeded_location(&app);
        let uri = format!("/api/locations/{}/policies", loc.id);

        let (status, body) = send(&app, Method::POST, &uri, Some(json!({"policy_id": "POL-002"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["policy_ids"], json!(["POL-001", "POL-002"]));

        let (_, body) = send(&app, Method::POST, &uri, Some(json!({"policy_id": "POL-002"}))).await;
        assert_eq!(body["policy_ids"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_location_is_not_found() {
        let app = test_app();
        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/locations/{}", Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}

// ============================================================================
// Trigger Tests
// ============================================================================

#[cfg(test)]
mod trigger_tests {
    use super::*;

    fn trigger_body(location_id: Uuid, category: &str, threshold: &str) -> Value {
        json!({
            "location_id": location_id,
            "category": category,
            "threshold_value": threshold,
            "threshold_operator": "gt",
            "payout_amount": "50000"
        })
    }

    #[tokio::test]
    async fn test_create_list_and_toggle_trigger() {
        let app = test_app();
        let loc = seeded_location(&app);

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/triggers",
            Some(trigger_body(loc.id, "rainfall", "25.0")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["category"], "rainfall");
        assert_eq!(created["threshold_value"], "25.0");
        assert_eq!(created["duration_hours"], 1);
        assert_eq!(created["active"], true);

        let (_, listed) = send(&app, Method::GET, &format!("/api/triggers/location/{}", loc.id), None).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let id = created["id"].as_str().unwrap();
        let (status, toggled) = send(&app, Method::PATCH, &format!("/api/triggers/{}/toggle", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(toggled["active"], false);

        let (_, toggled) = send(&app, Method::PATCH, &format!("/api/triggers/{}/toggle", id), None).await;
        assert_eq!(toggled["active"], true);
    }

    #[tokio::test]
    async fn test_zero_threshold_rejected() {
        let app = test_app();
        let loc = seeded_location(&app);
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/triggers",
            Some(trigger_body(loc.id, "wind_speed", "0")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["field"], "threshold_value");
    }

    #[tokio::test]
    async fn test_unobservable_category_rejected() {
        let app = test_app();
        let loc = seeded_location(&app);
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/triggers",
            Some(trigger_body(loc.id, "flood_risk", "10")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["field"], "category");
    }

    #[tokio::test]
    async fn test_trigger_on_unknown_location() {
        let app = test_app();
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/triggers",
            Some(trigger_body(Uuid::new_v4(), "rainfall", "25")),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/api/triggers/location/{}", Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_toggle_unknown_trigger() {
        let app = test_app();
        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/api/triggers/{}/toggle", Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}

// ============================================================================
// Alert Tests
// ============================================================================

#[cfg(test)]
mod alert_tests {
    use super::*;

    fn seed_alert(app: &TestApp, location_id: Uuid, rainfall: &str) -> Uuid {
        let t = trigger(location_id, TriggerCategory::Rainfall, "25.0", ThresholdOperator::Gt);
        let alert = create_alert(&reading(location_id, rainfall, "0"), &t);
        let id = alert.id;
        app.store.append_alert(alert).unwrap();
        id
    }

    #[tokio::test]
    async fn test_resolve_hides_alert_from_active_list() {
        let app = test_app();
        let loc = seeded_location(&app);
        let alert_id = seed_alert(&app, loc.id, "30.0");

        let (_, active) = send(&app, Method::GET, "/api/alerts", None).await;
        assert_eq!(active.as_array().unwrap().len(), 1);

        let (status, resolved) = send(&app, Method::PATCH, &format!("/api/alerts/{}/resolve", alert_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resolved["resolved"], true);

        let (_, active) = send(&app, Method::GET, "/api/alerts", None).await;
        assert!(active.as_array().unwrap().is_empty());

        let (_, all) = send(&app, Method::GET, "/api/alerts?active_only=false", None).await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_filter_by_risk_level() {
        let app = test_app();
        let loc = seeded_location(&app);
        seed_alert(&app, loc.id, "40.0"); // critical
        seed_alert(&app, loc.id, "26.0"); // medium

        let (status, body) = send(&app, Method::GET, "/api/alerts?risk_level=critical", None).await;
        assert_eq!(status, StatusCode::OK);
        let alerts = body.as_array().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0]["risk_level"], "critical");
    }

    #[tokio::test]
    async fn test_location_alerts() {
        let app = test_app();
        let loc = seeded_location(&app);
        let other = location("Rayong");
        app.store.insert_location(other.clone()).unwrap();
        seed_alert(&app, loc.id, "30.0");
        seed_alert(&app, other.id, "30.0");

        let (status, body) = send(&app, Method::GET, &format!("/api/alerts/location/{}", loc.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/api/alerts/location/{}", Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_alert_is_not_found() {
        let app = test_app();
        let (status, _) = send(&app, Method::GET, &format!("/api/alerts/{}", Uuid::new_v4()), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::PATCH,
            &format!("/api/alerts/{}/resolve", Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

// ============================================================================
// Forecast Tests
// ============================================================================

#[cfg(test)]
mod forecast_tests {
    use super::*;

    #[tokio::test]
    async fn test_forecast_is_scored_against_triggers() {
        let app = test_app();
        let loc = seeded_location(&app);
        let t = trigger(loc.id, TriggerCategory::Rainfall, "50", ThresholdOperator::Gt);
        app.store.insert_trigger(t.clone()).unwrap();
        app.weather.set_forecast(
            loc.id,
            vec![forecast_point(loc.id, "60", "0"), forecast_point(loc.id, "0", "0")],
        );

        let (status, body) = send(&app, Method::GET, &format!("/api/forecast/{}", loc.id), None).await;
        assert_eq!(status, StatusCode::OK);

        let points = body.as_array().unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0]["risk_score"], "0.7");
        assert_eq!(points[0]["potential_triggers"], json!([t.id]));
        assert_eq!(points[1]["risk_score"], "0");
    }

    #[tokio::test]
    async fn test_forecast_with_tiny_threshold() {
        let app = test_app();
        let loc = seeded_location(&app);
        let mut t = trigger(loc.id, TriggerCategory::WindSpeed, "1", ThresholdOperator::Gt);
        t.threshold_value = rust_decimal::Decimal::new(1, 28);
        app.store.insert_trigger(t.clone()).unwrap();
        app.weather.set_forecast(loc.id, vec![forecast_point(loc.id, "0", "25")]);

        let (status, body) = send(&app, Method::GET, &format!("/api/forecast/{}", loc.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["risk_score"], "0.6");
        assert_eq!(body[0]["potential_triggers"], json!([t.id]));
    }

    #[tokio::test]
    async fn test_current_weather() {
        let app = test_app();
        let loc = seeded_location(&app);
        app.weather.set_reading(reading(loc.id, "12.5", "8.0"));

        let (status, body) = send(&app, Method::GET, &format!("/api/forecast/{}/current", loc.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rainfall"], "12.5");
        assert_eq!(body["wind_speed"], "8.0");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_service_unavailable() {
        let app = test_app();
        let loc = seeded_location(&app);
        app.weather.fail_for(loc.id);

        let (status, body) = send(&app, Method::GET, &format!("/api/forecast/{}", loc.id), None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "WEATHER_SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_forecast_for_unknown_location() {
        let app = test_app();
        let (status, _) = send(&app, Method::GET, &format!("/api/forecast/{}", Uuid::new_v4()), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
