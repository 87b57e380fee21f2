use std::sync::Arc;

use crate::{
    error::AppResult,
    push::{PushClient, PushMessage, PushTarget},
    storage::DeviceStore,
};

/// Turns a notification request into exactly one push provider call.
pub struct NotificationService {
    devices: Arc<dyn DeviceStore>,
    push: Arc<dyn PushClient>,
    broadcast_topic: String,
}

impl NotificationService {
    pub fn new(
        devices: Arc<dyn DeviceStore>,
        push: Arc<dyn PushClient>,
        broadcast_topic: impl Into<String>,
    ) -> Self {
        Self {
            devices,
            push,
            broadcast_topic: broadcast_topic.into(),
        }
    }

    /// Send to the push token stored for `device_id`.
    pub async fn send_to_device(&self, device_id: &str, title: &str, body: &str) -> AppResult<String> {
        let device = self.devices.get_by_id(device_id).await?;

        let message = PushMessage::new(PushTarget::Token(device.token), title, body);
        let name = self.push.send(&message).await?;

        tracing::info!(device_id = %device_id, message = %name, "Notification dispatched to device");
        Ok(name)
    }

    /// Send to the broadcast topic. Devices are not enumerated.
    pub async fn send_to_all(&self, title: &str, body: &str) -> AppResult<String> {
        let message = PushMessage::new(PushTarget::Topic(self.broadcast_topic.clone()), title, body);
        let name = self.push.send(&message).await?;

        tracing::info!(topic = %self.broadcast_topic, message = %name, "Broadcast notification dispatched");
        Ok(name)
    }
}
