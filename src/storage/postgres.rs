use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use super::{normalize_token, resolve_id, DeviceStore};
use crate::{
    error::{AppError, AppResult},
    models::{Device, DeviceChanges, NewDevice},
};

const DEVICE_COLUMNS: &str = "id, token, model, first_seen_at, last_seen_at";

#[derive(Clone)]
pub struct PgDeviceStore {
    db: PgPool,
}

impl PgDeviceStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Unique violations on `id` or `token` become `DeviceAlreadyExists`.
fn classify(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::DeviceAlreadyExists
        }
        _ => AppError::Database(err),
    }
}

#[async_trait]
impl DeviceStore for PgDeviceStore {
    async fn create(&self, device: NewDevice) -> AppResult<Device> {
        let token = normalize_token(&device.token)?;
        let id = resolve_id(device.id.as_deref())?;
        let now = Utc::now();

        let device: Device = sqlx::query_as(&format!(
            r#"
            INSERT INTO devices (id, token, model, first_seen_at, last_seen_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING {DEVICE_COLUMNS}
            "#
        ))
        .bind(&id)
        .bind(&token)
        .bind(device.model.unwrap_or_default())
        .bind(now)
        .fetch_one(&self.db)
        .await
        .map_err(classify)?;

        tracing::debug!(device_id = %device.id, "device registered");
        Ok(device)
    }

    async fn update(&self, id: &str, changes: DeviceChanges) -> AppResult<Device> {
        let token = normalize_token(&changes.token)?;

        let device: Option<Device> = sqlx::query_as(&format!(
            r#"
            UPDATE devices
            SET token = $2,
                model = COALESCE($3, model),
                last_seen_at = GREATEST(last_seen_at, $4)
            WHERE id = $1
            RETURNING {DEVICE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&token)
        .bind(changes.model.as_deref())
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await
        .map_err(classify)?;

        device.ok_or(AppError::DeviceNotFound)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::DeviceNotFound);
        }

        tracing::debug!(device_id = %id, "device deleted");
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Device> {
        let device: Option<Device> =
            sqlx::query_as(&format!("SELECT {DEVICE_COLUMNS} FROM devices WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        device.ok_or(AppError::DeviceNotFound)
    }

    async fn get_by_token(&self, token: &str) -> AppResult<Device> {
        let device: Option<Device> = sqlx::query_as(&format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE token = $1"
        ))
        .bind(token.trim())
        .fetch_optional(&self.db)
        .await?;

        device.ok_or(AppError::DeviceNotFound)
    }

    async fn get_all(&self) -> AppResult<Vec<Device>> {
        let devices: Vec<Device> = sqlx::query_as(&format!(
            "SELECT {DEVICE_COLUMNS} FROM devices ORDER BY first_seen_at, id"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(devices)
    }
}
