//! Route table of the simulator API

use crate::{handlers::files, models::ApiResponse, websocket::websocket_handler, AppState};
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route(
            "/api/files",
            get(files::list_files)
                .post(files::submit_files)
                .delete(files::clear_files),
        )
        .route(
            "/api/files/:id",
            get(files::get_file).delete(files::remove_file),
        )
        .route("/api/stage", get(files::get_stage))
        .route("/api/stats", get(files::get_stats))
        .route("/api/validation", get(files::get_validation_rules))
        .route("/ws", get(websocket_handler))
}

async fn handle_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(serde_json::json!({
        "app": state.app_name,
        "version": state.version,
        "message": "Simulated file upload pipeline",
        "endpoints": {
            "health": "/health",
            "files": "/api/files",
            "file": "/api/files/{id}",
            "stage": "/api/stage",
            "stats": "/api/stats",
            "validation": "/api/validation",
            "events": "/ws"
        }
    })))
}

async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "busy": state.simulator.is_busy(),
        "stats": state.simulator.stats(),
    })))
}
