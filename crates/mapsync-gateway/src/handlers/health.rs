use crate::model::HealthResponse;
use axum::Json;

pub async fn home_handler() -> &'static str {
    "MapSync backend is running"
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
