//! Image storage backends.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

mod r2;

pub use r2::{R2Config, R2Storage};

#[automock]
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Store an uploaded image and return its public URL.
    async fn upload_image(
        &self,
        content: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<String, StorageServiceError>;
}

/// Errors that can occur when talking to the object store.
#[derive(Debug, Error)]
pub enum StorageServiceError {
    /// The bucket credentials are missing from the configuration.
    #[error("image storage is not configured")]
    NotConfigured,

    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The object store returned a non-2xx response.
    #[error("unexpected response from object store: {0}")]
    UnexpectedResponse(String),
}
