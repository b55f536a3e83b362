//! Webhook notifier.
//!
//! POSTs a JSON [`NotificationPayload`] to a fixed URL. When a signing secret
//! is configured the raw body is signed with HMAC-SHA256 and the lowercase hex
//! digest is sent as `X-Signature-256: sha256=<hex>`.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use std::time::Duration;

use crate::ports::{Notifier, NotifierError};

use super::payload::{require_topic, NotificationPayload};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the body signature.
pub const SIGNATURE_HEADER: &str = "X-Signature-256";

pub struct WebhookNotifier {
    client: Client,
    url: String,
    topic: String,
    signing_secret: Option<Secret<String>>,
}

impl WebhookNotifier {
    pub fn new(
        url: impl Into<String>,
        topic: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotifierError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifierError::Delivery(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            topic: topic.into(),
            signing_secret: None,
        })
    }

    /// Signs every request body with the given secret.
    pub fn with_signing_secret(mut self, secret: impl Into<String>) -> Self {
        self.signing_secret = Some(Secret::new(secret.into()));
        self
    }
}

/// `sha256=<hex>` signature of `body`.
pub fn sign_body(secret: &str, body: &[u8]) -> Result<String, NotifierError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| NotifierError::Delivery(format!("Invalid signing key: {}", e)))?;
    mac.update(body);
    Ok(format!("sha256={}", hex_encode(&mac.finalize().into_bytes())))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn publish(&self, subject: &str, body: &str) -> Result<(), NotifierError> {
        let topic = require_topic(&self.topic)?;
        if self.url.trim().is_empty() {
            return Err(NotifierError::NotConfigured("webhook url"));
        }
        let json = NotificationPayload::new(topic, subject, body).to_json()?;

        let mut request = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(secret) = &self.signing_secret {
            request = request.header(
                SIGNATURE_HEADER,
                sign_body(secret.expose_secret(), json.as_bytes())?,
            );
        }

        let response = request
            .body(json)
            .send()
            .await
            .map_err(|e| NotifierError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %self.url, "Webhook rejected alert");
            return Err(NotifierError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::debug!(topic, "Delivered door alert to webhook");
        Ok(())
    }
}
