// src/presentation/http/uploads.rs
use crate::presentation::http::error::{HttpError, HttpResult};
use axum::extract::Multipart;
use bytes::Bytes;
use utoipa::ToSchema;

pub const UPLOAD_FIELD: &str = "file";

/// Multipart body with a single image under the `file` field.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ImageUpload {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Debug)]
pub struct UploadedFile {
    pub data: Bytes,
    pub file_name: String,
    pub content_type: String,
}

/// Reads the first `file` part of the form. Other parts are skipped.
pub async fn read_upload(mut multipart: Multipart) -> HttpResult<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| HttpError::bad_request(err.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|err| HttpError::bad_request(err.body_text()))?;
        return Ok(UploadedFile {
            data,
            file_name,
            content_type,
        });
    }
    Err(HttpError::bad_request(format!(
        "multipart field '{UPLOAD_FIELD}' is required"
    )))
}
