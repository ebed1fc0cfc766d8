use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use service_core::middleware::render_metrics;

use crate::dtos::{HealthResponse, RootResponse};
use crate::models::ServiceType;
use crate::startup::AppState;

/// Liveness probe. Always 200; reports whether readings are generated or canned.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
        services: ServiceType::priced(),
        generator: state.generator.backend_name(),
        bot_configured: state.bot.is_configured(),
        orders: state.orders.count().await,
    })
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Astrology Bot Backend is running!",
        timestamp: Utc::now(),
        endpoints: vec![
            "/api/health",
            "/api/create-invoice",
            "/api/daily-horoscope",
            "/api/weekly-horoscope",
            "/api/compatibility",
            "/api/tarot-reading",
            "/api/natal-chart",
            "/api/service-result/:orderId",
            "/api/webhook/payment",
            "/api/order/:orderId",
            "/api/user-orders/:userId",
        ],
    })
}

/// Prometheus metrics endpoint.
pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        render_metrics(),
    )
}
