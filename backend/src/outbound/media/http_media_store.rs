//! Reqwest-backed media store adapter.
//!
//! Uploads image bytes to an ImageKit-compatible endpoint and returns the
//! hosted URL. This adapter owns transport details only: multipart
//! assembly, basic-auth with the private key, and HTTP error mapping.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::ports::{BlobSink, BlobSinkError, BlobUpload, StorageKind, StoredBlob};

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);
const MENU_FOLDER: &str = "/menus";

#[derive(Debug, Deserialize)]
struct UploadResponseDto {
    url: String,
}

/// Media store adapter performing authenticated multipart uploads.
pub struct HttpMediaStore {
    client: Client,
    endpoint: String,
    private_key: String,
}

impl HttpMediaStore {
    /// Build an adapter for the given upload endpoint and private key.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: String, private_key: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(UPLOAD_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint,
            private_key,
        })
    }
}

#[async_trait]
impl BlobSink for HttpMediaStore {
    async fn store(&self, upload: BlobUpload) -> Result<StoredBlob, BlobSinkError> {
        let form = reqwest::multipart::Form::new()
            .text("file", STANDARD.encode(&upload.bytes))
            .text("fileName", upload.file_name)
            .text("folder", MENU_FOLDER);

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.private_key, Some(""))
            .multipart(form)
            .send()
            .await
            .map_err(|err| BlobSinkError::upload(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BlobSinkError::upload(format!(
                "media store returned status {}: {body}",
                status.as_u16()
            )));
        }

        let decoded: UploadResponseDto = response
            .json()
            .await
            .map_err(|err| BlobSinkError::upload(format!("invalid media store response: {err}")))?;

        Ok(StoredBlob {
            url: decoded.url,
            kind: StorageKind::Remote,
        })
    }
}
