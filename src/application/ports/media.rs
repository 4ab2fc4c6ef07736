// src/application/ports/media.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;
use bytes::Bytes;

/// Blob storage for uploaded images.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Stores the file and returns its public URL.
    async fn save(&self, data: Bytes, file_name: &str, content_type: &str)
    -> ApplicationResult<String>;
    /// Removes a file previously returned by [`MediaStore::save`]. Returns
    /// `false` when the URL is unknown to this store.
    async fn delete(&self, url: &str) -> ApplicationResult<bool>;
}
