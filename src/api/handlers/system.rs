use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: String,
    pub status: bool,
}

pub async fn welcome() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Welcome to the push relay API".to_string(),
        status: true,
    })
}

pub async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Service is healthy".to_string(),
        status: true,
    })
}
