// src/infrastructure/media.rs
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use image::ImageFormat;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::{ApplicationError, ApplicationResult, ports::media::MediaStore};

/// Stores uploads in a local directory that is served under `public_url`.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
    public_url: String,
}

impl LocalMediaStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        let public_url = public_url.into();
        Self {
            root: root.into(),
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_root(&self) -> ApplicationResult<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|err| ApplicationError::infrastructure(format!("cannot create media root: {err}")))
    }

    /// Maps a URL issued by this store back to its file, refusing anything
    /// outside the root.
    fn path_for(&self, url: &str) -> Option<PathBuf> {
        let name = url.strip_prefix(&self.public_url)?.strip_prefix('/')?;
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
            && !name.starts_with('.');
        valid.then(|| self.root.join(name))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn save(
        &self,
        data: Bytes,
        file_name: &str,
        content_type: &str,
    ) -> ApplicationResult<String> {
        let format = accepted_format(content_type).ok_or_else(|| {
            ApplicationError::validation(format!(
                "unsupported content type '{content_type}', expected png, jpeg, gif or webp"
            ))
        })?;
        if data.is_empty() {
            return Err(ApplicationError::validation("uploaded file is empty"));
        }
        if image::guess_format(&data).ok() != Some(format) {
            return Err(ApplicationError::validation(format!(
                "'{file_name}' is not a {content_type} image"
            )));
        }

        let stored_name = format!("{}.{}", Uuid::new_v4(), extension_for(format));
        self.ensure_root().await?;
        let path = self.root.join(&stored_name);
        fs::write(&path, &data)
            .await
            .map_err(|err| ApplicationError::infrastructure(format!("cannot store upload: {err}")))?;

        info!(file = %path.display(), bytes = data.len(), "stored upload");
        Ok(format!("{}/{stored_name}", self.public_url))
    }

    async fn delete(&self, url: &str) -> ApplicationResult<bool> {
        let Some(path) = self.path_for(url) else {
            debug!(url, "not a managed media url");
            return Ok(false);
        };
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(ApplicationError::infrastructure(format!(
                "cannot remove {}: {err}",
                path.display()
            ))),
        }
    }
}

/// Image types accepted for upload. Anything a browser could render as an
/// active document stays out.
fn accepted_format(content_type: &str) -> Option<ImageFormat> {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    match essence.to_ascii_lowercase().as_str() {
        "image/png" => Some(ImageFormat::Png),
        "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
        "image/gif" => Some(ImageFormat::Gif),
        "image/webp" => Some(ImageFormat::WebP),
        _ => None,
    }
}

const fn extension_for(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "png",
        ImageFormat::Gif => "gif",
        ImageFormat::WebP => "webp",
        _ => "jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF\0";

    fn store() -> LocalMediaStore {
        let root = std::env::temp_dir().join(format!("quill-media-{}", Uuid::new_v4()));
        LocalMediaStore::new(root, "/media/")
    }

    #[tokio::test]
    async fn saves_and_deletes_images() {
        let store = store();
        let url = store
            .save(Bytes::from_static(PNG), "Cover.PNG", "image/png")
            .await
            .unwrap();
        assert!(url.starts_with("/media/"));
        assert!(url.ends_with(".png"));

        assert!(store.delete(&url).await.unwrap());
        assert!(!store.delete(&url).await.unwrap());
        let _ = fs::remove_dir_all(store.root()).await;
    }

    #[tokio::test]
    async fn rejects_non_images() {
        let err = store()
            .save(Bytes::from_static(b"hello"), "notes.txt", "text/plain")
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(_)));
    }

    #[tokio::test]
    async fn ignores_foreign_urls() {
        let store = store();
        assert!(!store.delete("https://cdn.example.com/a.png").await.unwrap());
        assert!(!store.delete("/media/../secret").await.unwrap());
    }

    #[tokio::test]
    async fn extension_comes_from_the_image_type_not_the_file_name() {
        let store = store();
        let url = store
            .save(Bytes::from_static(JPEG), "evil.html", "image/jpeg")
            .await
            .unwrap();
        assert!(url.ends_with(".jpg"), "{url}");
        let _ = fs::remove_dir_all(store.root()).await;
    }

    #[tokio::test]
    async fn rejects_markup_declared_as_an_image() {
        let store = store();
        let err = store
            .save(
                Bytes::from_static(b"<script>alert(1)</script>"),
                "evil.html",
                "image/png",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(_)));

        let err = store
            .save(
                Bytes::from_static(b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>"),
                "logo.svg",
                "image/svg+xml",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(_)));
    }

    #[tokio::test]
    async fn rejects_bytes_that_disagree_with_the_declared_type() {
        let err = store()
            .save(Bytes::from_static(JPEG), "photo.png", "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(_)));
    }

    #[test]
    fn accepts_only_raster_types() {
        assert_eq!(accepted_format("image/webp"), Some(ImageFormat::WebP));
        assert_eq!(accepted_format("IMAGE/JPEG; q=1"), Some(ImageFormat::Jpeg));
        assert_eq!(accepted_format("image/svg+xml"), None);
        assert_eq!(accepted_format("text/html"), None);
    }
}
