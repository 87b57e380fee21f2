//! Push provider client.
//!
//! The dispatcher only sees [`PushClient`]; [`fcm::FcmClient`] talks to Firebase Cloud Messaging.

pub mod fcm;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub use fcm::{FcmClient, ServiceAccountKey};

#[derive(Debug, Error)]
pub enum PushError {
    #[error("Invalid push credentials: {0}")]
    Credentials(String),
    #[error("Failed to sign access token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("Access token request failed with status {status}: {body}")]
    Auth { status: u16, body: String },
    #[error("Push provider rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Push transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Where a message is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PushTarget {
    Token(String),
    Topic(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushMessage {
    #[serde(flatten)]
    pub target: PushTarget,
    pub notification: Notification,
}

impl PushMessage {
    pub fn new(target: PushTarget, title: &str, body: &str) -> Self {
        Self {
            target,
            notification: Notification {
                title: title.to_string(),
                body: body.to_string(),
            },
        }
    }
}

#[async_trait]
pub trait PushClient: Send + Sync {
    /// Submit one message. Returns the provider-assigned message name.
    async fn send(&self, message: &PushMessage) -> Result<String, PushError>;
}
