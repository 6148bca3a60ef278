//! Reqwest-backed web-push transport adapter.
//!
//! Posts the notification payload to each subscription endpoint with a
//! VAPID authorization header. `404`/`410` responses are mapped to the
//! gone signal that drives subscription pruning; everything else is a
//! transient delivery failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::info;

use crate::domain::ports::{PushDeliveryError, PushTransport};
use crate::domain::{NotificationPayload, WebPushSubscription};

use super::vapid::VapidKeys;

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(15);
/// How long the push service may queue an undelivered message, in seconds.
const PUSH_TTL_SECONDS: &str = "86400";

/// Push transport performing HTTP POSTs against subscription endpoints.
pub struct HttpPushTransport {
    client: Client,
    vapid: VapidKeys,
}

impl HttpPushTransport {
    /// Build a transport signing requests with the given VAPID identity.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(vapid: VapidKeys) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(DELIVERY_TIMEOUT).build()?;
        Ok(Self { client, vapid })
    }
}

#[async_trait]
impl PushTransport for HttpPushTransport {
    async fn deliver(
        &self,
        subscription: &WebPushSubscription,
        payload: &NotificationPayload,
    ) -> Result<(), PushDeliveryError> {
        let authorization = self
            .vapid
            .authorization_header(&subscription.endpoint)
            .map_err(|err| PushDeliveryError::delivery(err.to_string()))?;

        // TODO: encrypt payloads per RFC 8291 (aes128gcm) using the
        // subscriber's p256dh/auth keys; plaintext bodies are rejected by
        // strict push services, in which case delivery degrades to a bare
        // tickle with the same prune semantics.
        let response = self
            .client
            .post(&subscription.endpoint)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .header("TTL", PUSH_TTL_SECONDS)
            .json(payload)
            .send()
            .await
            .map_err(|err| PushDeliveryError::delivery(err.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND | StatusCode::GONE => Err(PushDeliveryError::Gone),
            status => Err(PushDeliveryError::delivery(format!(
                "push service returned status {}",
                status.as_u16()
            ))),
        }
    }
}

/// No-op transport used when no VAPID material is configured.
///
/// Keeps the fan-out observable in development without a push service;
/// every delivery is logged and reported successful.
pub struct LoggingPushTransport;

#[async_trait]
impl PushTransport for LoggingPushTransport {
    async fn deliver(
        &self,
        subscription: &WebPushSubscription,
        payload: &NotificationPayload,
    ) -> Result<(), PushDeliveryError> {
        info!(
            endpoint = %subscription.endpoint,
            title = %payload.title,
            "push transport not configured; logging delivery"
        );
        Ok(())
    }
}
