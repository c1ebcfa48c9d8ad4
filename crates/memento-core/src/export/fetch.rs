//! Fetching remote image bytes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{MementoError, Result};

/// Default per-request timeout for image downloads.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of image bytes for same-origin and external references.
///
/// The exporter awaits one fetch at a time; implementations do not need to
/// be reentrant-friendly beyond `Send + Sync`.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Download the resource at `url`.
    ///
    /// # Errors
    ///
    /// Returns `MementoError::Fetch` on network failure or a non-success
    /// response.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}

#[async_trait]
impl<T: ImageFetcher + ?Sized> ImageFetcher for Arc<T> {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        (**self).fetch(url).await
    }
}

/// HTTP fetcher backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MementoError::Fetch(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MementoError::Fetch(format!("{} returned {}", url, status)));
        }
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
