//! In-process [`DeviceStore`] used by handler and service tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{normalize_token, resolve_id, DeviceStore};
use crate::{
    error::{AppError, AppResult},
    models::{Device, DeviceChanges, NewDevice},
};

#[derive(Default)]
pub struct MemoryDeviceStore {
    devices: RwLock<Vec<Device>>,
    calls: AtomicUsize,
}

impl MemoryDeviceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.devices.read().await.len()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DeviceStore for MemoryDeviceStore {
    async fn create(&self, device: NewDevice) -> AppResult<Device> {
        self.record_call();
        let token = normalize_token(&device.token)?;
        let id = resolve_id(device.id.as_deref())?;

        let mut devices = self.devices.write().await;
        if devices.iter().any(|d| d.id == id || d.token == token) {
            return Err(AppError::DeviceAlreadyExists);
        }

        let now = Utc::now();
        let device = Device {
            id,
            token,
            model: device.model.unwrap_or_default(),
            first_seen_at: now,
            last_seen_at: now,
        };
        devices.push(device.clone());
        Ok(device)
    }

    async fn update(&self, id: &str, changes: DeviceChanges) -> AppResult<Device> {
        self.record_call();
        let token = normalize_token(&changes.token)?;

        let mut devices = self.devices.write().await;
        let index = devices
            .iter()
            .position(|d| d.id == id)
            .ok_or(AppError::DeviceNotFound)?;
        if devices.iter().any(|d| d.id != id && d.token == token) {
            return Err(AppError::DeviceAlreadyExists);
        }

        let device = &mut devices[index];
        device.token = token;
        if let Some(model) = changes.model {
            device.model = model;
        }
        device.last_seen_at = device.last_seen_at.max(Utc::now());
        Ok(device.clone())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.record_call();
        let mut devices = self.devices.write().await;
        let before = devices.len();
        devices.retain(|d| d.id != id);
        if devices.len() == before {
            return Err(AppError::DeviceNotFound);
        }
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Device> {
        self.record_call();
        self.devices
            .read()
            .await
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or(AppError::DeviceNotFound)
    }

    async fn get_by_token(&self, token: &str) -> AppResult<Device> {
        self.record_call();
        let token = token.trim();
        self.devices
            .read()
            .await
            .iter()
            .find(|d| d.token == token)
            .cloned()
            .ok_or(AppError::DeviceNotFound)
    }

    async fn get_all(&self) -> AppResult<Vec<Device>> {
        self.record_call();
        Ok(self.devices.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(token: &str, model: &str) -> NewDevice {
        NewDevice {
            id: None,
            token: token.to_string(),
            model: Some(model.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_then_lookup() {
        let store = MemoryDeviceStore::new();
        let created = store.create(registration("tok-1", "Pixel")).await.unwrap();

        assert_eq!(created.first_seen_at, created.last_seen_at);

        let by_id = store.get_by_id(&created.id).await.unwrap();
        let by_token = store.get_by_token("tok-1").await.unwrap();
        assert_eq!(by_id, created);
        assert_eq!(by_token, created);
        assert_eq!(by_id.model, "Pixel");
    }

    #[tokio::test]
    async fn test_create_with_client_supplied_id() {
        let store = MemoryDeviceStore::new();
        let created = store
            .create(NewDevice {
                id: Some("phone-42".to_string()),
                token: "tok-1".to_string(),
                model: None,
            })
            .await
            .unwrap();

        assert_eq!(created.id, "phone-42");
        assert_eq!(created.model, "");
    }

    #[tokio::test]
    async fn test_duplicate_token_is_rejected() {
        let store = MemoryDeviceStore::new();
        store.create(registration("tok-1", "Pixel")).await.unwrap();

        let result = store.create(registration("tok-1", "Galaxy")).await;
        assert!(matches!(result, Err(AppError::DeviceAlreadyExists)));
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected() {
        let store = MemoryDeviceStore::new();
        let result = store.create(registration("  ", "Pixel")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_update_missing_device() {
        let store = MemoryDeviceStore::new();
        let existing = store.create(registration("tok-1", "Pixel")).await.unwrap();

        let result = store
            .update(
                "missing",
                DeviceChanges {
                    token: "tok-2".to_string(),
                    model: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::DeviceNotFound)));
        assert_eq!(store.get_all().await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn test_update_missing_device_with_taken_token() {
        let store = MemoryDeviceStore::new();
        let existing = store.create(registration("tok-1", "Pixel")).await.unwrap();

        let result = store
            .update(
                "missing",
                DeviceChanges {
                    token: "tok-1".to_string(),
                    model: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::DeviceNotFound)));
        assert_eq!(store.get_all().await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn test_lookup_by_padded_token() {
        let store = MemoryDeviceStore::new();
        let created = store.create(registration(" tok-1 ", "Pixel")).await.unwrap();

        assert_eq!(store.get_by_token("tok-1 ").await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_keeps_first_seen() {
        let store = MemoryDeviceStore::new();
        let created = store.create(registration("tok-1", "Pixel")).await.unwrap();

        let updated = store
            .update(
                &created.id,
                DeviceChanges {
                    token: "tok-2".to_string(),
                    model: Some("Pixel 8".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_seen_at, created.first_seen_at);
        assert!(updated.last_seen_at >= created.last_seen_at);
        assert_eq!(updated.token, "tok-2");
        assert_eq!(updated.model, "Pixel 8");
    }

    #[tokio::test]
    async fn test_update_to_foreign_token_conflicts() {
        let store = MemoryDeviceStore::new();
        let first = store.create(registration("tok-1", "Pixel")).await.unwrap();
        store.create(registration("tok-2", "Galaxy")).await.unwrap();

        let result = store
            .update(
                &first.id,
                DeviceChanges {
                    token: "tok-2".to_string(),
                    model: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::DeviceAlreadyExists)));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = MemoryDeviceStore::new();
        let created = store.create(registration("tok-1", "Pixel")).await.unwrap();

        assert!(store.delete(&created.id).await.is_ok());
        assert!(matches!(
            store.delete(&created.id).await,
            Err(AppError::DeviceNotFound)
        ));
    }
}
