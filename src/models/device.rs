use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Device {
    pub id: String,
    pub token: String,
    pub model: String,
    pub first_seen_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Registration payload. The server assigns `id` unless the client supplies one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewDevice {
    #[serde(default)]
    pub id: Option<String>,
    pub token: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// Overwrite of an existing device. A missing model keeps the stored one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceChanges {
    pub token: String,
    #[serde(default)]
    pub model: Option<String>,
}
