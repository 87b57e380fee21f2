use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DispatchResponse {
    /// Message name assigned by the push provider.
    pub name: String,
}
