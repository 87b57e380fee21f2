use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::extract::AppJson,
    error::{AppError, AppResult},
    models::{DispatchResponse, NotificationRequest},
    AppState,
};

pub async fn send_to_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    AppJson(req): AppJson<NotificationRequest>,
) -> AppResult<Json<DispatchResponse>> {
    let name = state
        .notifications
        .send_to_device(&device_id, &req.title, &req.body)
        .await?;

    Ok(Json(DispatchResponse { name }))
}

/// `POST /notify/device/` with no identifier.
pub async fn missing_device_id() -> AppError {
    AppError::BadRequest("device id is required".to_string())
}

pub async fn send_to_all(
    State(state): State<AppState>,
    AppJson(req): AppJson<NotificationRequest>,
) -> AppResult<Json<DispatchResponse>> {
    let name = state
        .notifications
        .send_to_all(&req.title, &req.body)
        .await?;

    Ok(Json(DispatchResponse { name }))
}
