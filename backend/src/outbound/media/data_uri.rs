//! Inline `data:` URI fallback for unconfigured media stores.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::domain::ports::{BlobSink, BlobSinkError, BlobUpload, StorageKind, StoredBlob};

/// Blob sink that embeds the image directly in the record.
///
/// Selected at wiring time when no media-store credential is configured (or
/// the credential is a placeholder). The produced URL is self-contained, so
/// callers see the same response shape as with the real store.
pub struct DataUriBlobSink;

#[async_trait]
impl BlobSink for DataUriBlobSink {
    async fn store(&self, upload: BlobUpload) -> Result<StoredBlob, BlobSinkError> {
        debug!(
            file_name = %upload.file_name,
            bytes = upload.bytes.len(),
            "media store not configured; inlining image as data URI"
        );
        let encoded = STANDARD.encode(&upload.bytes);
        Ok(StoredBlob {
            url: format!("data:{};base64,{encoded}", upload.content_type),
            kind: StorageKind::Inline,
        })
    }
}
