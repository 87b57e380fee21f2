use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::extract::AppJson,
    error::{AppError, AppResult},
    models::{Device, DeviceChanges, NewDevice},
    AppState,
};

pub async fn get_devices(State(state): State<AppState>) -> AppResult<Json<Vec<Device>>> {
    let devices = state.devices.get_all().await?;
    Ok(Json(devices))
}

pub async fn create_device(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewDevice>,
) -> AppResult<Json<Device>> {
    let device = state.devices.create(req).await?;
    tracing::info!(device_id = %device.id, model = %device.model, "Device registered");
    Ok(Json(device))
}

pub async fn get_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> AppResult<Json<Device>> {
    let device = state.devices.get_by_id(&device_id).await?;
    Ok(Json(device))
}

pub async fn get_device_by_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<Device>> {
    let device = state.devices.get_by_token(&token).await?;
    Ok(Json(device))
}

/// `/devices/` with no identifier.
pub async fn missing_device_id() -> AppError {
    AppError::BadRequest("device id is required".to_string())
}

pub async fn update_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    AppJson(req): AppJson<DeviceChanges>,
) -> AppResult<Json<Device>> {
    let device = state.devices.update(&device_id, req).await?;
    Ok(Json(device))
}

pub async fn remove_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> AppResult<StatusCode> {
    state.devices.delete(&device_id).await?;
    tracing::info!(device_id = %device_id, "Device removed");
    Ok(StatusCode::NO_CONTENT)
}
