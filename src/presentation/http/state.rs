// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub options: RouterOptions,
}

/// Router-level settings taken from configuration.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub media_root: PathBuf,
    /// Served from `media_root` when it is a path such as `/media`.
    pub media_public_url: String,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_upload_bytes: 5 * 1024 * 1024,
            media_root: PathBuf::from("uploads"),
            media_public_url: "/media".into(),
        }
    }
}
