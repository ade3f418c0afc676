use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::rsvp::{get_stats, list_rsvps, submit_rsvp};

/// The full HTTP surface. CORS is permissive (the original sent
/// `Access-Control-Allow-Origin: *`), and the CORS layer answers OPTIONS
/// preflights before they reach the method routers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/rsvp",
            post(submit_rsvp)
                .get(list_rsvps)
                .fallback(method_not_allowed),
        )
        .route("/api/stats", get(get_stats).fallback(method_not_allowed))
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "message": "Servidor funcionando correctamente",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Endpoint no encontrado" })),
    )
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "success": false, "message": "Método no permitido" })),
    )
}
