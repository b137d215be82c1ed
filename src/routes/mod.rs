//! Rutas HTTP
//!
//! `create_router` monta todos los routers bajo `/api` y aplica las capas
//! comunes (trazas, compresión, timeout, límite de concurrencia y CORS).

pub mod company_routes;
pub mod location_routes;
pub mod service_order_routes;
pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::cors_layer;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/companies", company_routes::create_company_router())
        .nest("/api/locations", location_routes::create_location_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest(
            "/api/service-orders",
            service_order_routes::create_service_order_router(),
        )
        .layer(GlobalConcurrencyLimitLayer::new(config.max_concurrent_requests.max(1)))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check simple
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
