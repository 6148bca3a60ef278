//! Outbound SMS adapters.
//!
//! The real adapter posts to a local Android SMS gateway; the logging
//! fallback keeps OTP flows usable in development by writing the code to
//! the log instead.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::domain::MobileNumber;
use crate::domain::ports::{SmsRelay, SmsRelayError};

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct SmsRequestDto<'a> {
    phone: &'a str,
    message: &'a str,
}

/// SMS relay posting `{phone, message}` to a gateway endpoint.
pub struct HttpSmsRelay {
    client: Client,
    endpoint: String,
}

impl HttpSmsRelay {
    /// Build a relay for the given gateway endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(SEND_TIMEOUT).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl SmsRelay for HttpSmsRelay {
    async fn send(&self, to: &MobileNumber, message: &str) -> Result<(), SmsRelayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&SmsRequestDto {
                phone: to.as_ref(),
                message,
            })
            .send()
            .await
            .map_err(|err| SmsRelayError::new(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SmsRelayError::new(format!(
                "sms gateway returned status {}",
                status.as_u16()
            )))
        }
    }
}

/// Fallback relay that logs the message instead of sending it.
pub struct LoggingSmsRelay;

#[async_trait]
impl SmsRelay for LoggingSmsRelay {
    async fn send(&self, to: &MobileNumber, message: &str) -> Result<(), SmsRelayError> {
        info!(%to, message, "sms gateway not configured; logging message");
        Ok(())
    }
}
