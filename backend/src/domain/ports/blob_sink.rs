//! Port abstraction for image storage.
//!
//! The publish workflow never knows whether an image went to the real media
//! store or was inlined as a `data:` URI; both adapters return the same
//! [`StoredBlob`] shape and the caller only sees the resulting URL and kind.

use async_trait::async_trait;

/// Errors raised while storing an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlobSinkError {
    /// The store rejected or failed the upload.
    #[error("image upload failed: {message}")]
    Upload {
        /// Adapter-supplied description.
        message: String,
    },
}

impl BlobSinkError {
    /// Build a [`Self::Upload`] error.
    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload {
            message: message.into(),
        }
    }
}

/// Raw image bytes plus the metadata needed to file them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobUpload {
    /// Image bytes as received from the client.
    pub bytes: Vec<u8>,
    /// Declared MIME type, e.g. `image/jpeg`.
    pub content_type: String,
    /// Name the blob should be filed under.
    pub file_name: String,
}

/// Where a stored blob's URL points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// A media-store URL.
    Remote,
    /// A self-contained `data:` URI embedded in the record.
    Inline,
}

/// Result of storing an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Stable URL to serve the image from.
    pub url: String,
    /// Whether the URL is remote or inline.
    pub kind: StorageKind,
}

/// Image storage capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobSink: Send + Sync {
    /// Store the image and return its URL.
    async fn store(&self, upload: BlobUpload) -> Result<StoredBlob, BlobSinkError>;
}
