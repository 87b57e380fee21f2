//! Firebase Cloud Messaging HTTP v1 client.
//!
//! Authenticates with a Google service account: an RS256-signed JWT assertion
//! is exchanged at the account's `token_uri` for a short-lived OAuth2 access
//! token, which is cached and reused until shortly before it expires.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{PushClient, PushError, PushMessage};

const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// The subset of a Google service account key file the client needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self, PushError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PushError::Credentials(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, PushError> {
        serde_json::from_str(raw)
            .map_err(|e| PushError::Credentials(format!("malformed service account key: {}", e)))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    message: &'a PushMessage,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    name: String,
}

struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

pub struct FcmClient {
    http: reqwest::Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    send_url: String,
    access_token: Mutex<Option<CachedToken>>,
}

impl FcmClient {
    /// `endpoint` is the API root, e.g. `https://fcm.googleapis.com/v1`.
    pub fn new(
        key: ServiceAccountKey,
        endpoint: &str,
        timeout: Duration,
    ) -> Result<Self, PushError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| PushError::Credentials(format!("invalid private key: {}", e)))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let send_url = format!(
            "{}/projects/{}/messages:send",
            endpoint.trim_end_matches('/'),
            key.project_id
        );

        Ok(Self {
            http,
            key,
            encoding_key,
            send_url,
            access_token: Mutex::new(None),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.key.project_id
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String, PushError> {
        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: FCM_SCOPE.to_string(),
            aud: self.key.token_uri.clone(),
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        Ok(encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    async fn access_token(&self) -> Result<String, PushError> {
        let mut cached = self.access_token.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref() {
            if token.expires_at > now + chrono::Duration::seconds(REFRESH_MARGIN_SECS) {
                return Ok(token.value.clone());
            }
        }

        let assertion = self.sign_assertion(now)?;
        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PushError::Auth {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json().await?;
        tracing::debug!(expires_in = token.expires_in, "Refreshed FCM access token");

        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: now + chrono::Duration::seconds(token.expires_in),
        });

        Ok(token.access_token)
    }
}

#[async_trait]
impl PushClient for FcmClient {
    async fn send(&self, message: &PushMessage) -> Result<String, PushError> {
        let access_token = self.access_token().await?;

        let response = self
            .http
            .post(&self.send_url)
            .bearer_auth(access_token)
            .json(&SendRequest { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PushError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let sent: SendResponse = response.json().await?;
        Ok(sent.name)
    }
}
