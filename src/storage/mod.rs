//! Device persistence.
//!
//! Handlers talk to a [`DeviceStore`]; production wires in [`PgDeviceStore`].

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Device, DeviceChanges, NewDevice},
};

pub use postgres::PgDeviceStore;

#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// Register a device. Fails with `DeviceAlreadyExists` when the token or id is taken.
    async fn create(&self, device: NewDevice) -> AppResult<Device>;

    /// Overwrite token/model and bump `last_seen_at`.
    async fn update(&self, id: &str, changes: DeviceChanges) -> AppResult<Device>;

    async fn delete(&self, id: &str) -> AppResult<()>;

    async fn get_by_id(&self, id: &str) -> AppResult<Device>;

    async fn get_by_token(&self, token: &str) -> AppResult<Device>;

    /// All devices, oldest registration first.
    async fn get_all(&self) -> AppResult<Vec<Device>>;
}

pub(crate) fn normalize_token(token: &str) -> AppResult<String> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::Validation("token is required".to_string()));
    }
    Ok(token.to_string())
}

pub(crate) fn resolve_id(requested: Option<&str>) -> AppResult<String> {
    match requested.map(str::trim) {
        Some("") => Err(AppError::Validation("id must not be empty".to_string())),
        Some(id) => Ok(id.to_string()),
        None => Ok(Uuid::new_v4().to_string()),
    }
}
