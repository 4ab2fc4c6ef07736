// tests/support/helpers.rs
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{self, Body};
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, TimeZone, Utc};
use quill_core::application::{
    dto::{AuthorDto, CategoryDto, PostDto},
    ports::{ClockPort, LookupCachePort, MediaStorePort, SlugGeneratorPort},
    services::ApplicationServices,
};
use quill_core::infrastructure::{
    cache::InMemoryLookupCache,
    media::LocalMediaStore,
    repositories::{InMemoryStore, memory_repositories},
    time::ManualClock,
    util::DefaultSlugGenerator,
};
use quill_core::presentation::http::{
    routes::build_router,
    state::{HttpState, RouterOptions},
};
use serde_json::Value;

use super::builders::{PostBuilder, author_command, category_command};

pub struct TestApp {
    pub services: Arc<ApplicationServices>,
    pub cache: Arc<InMemoryLookupCache>,
    pub clock: Arc<ManualClock>,
    pub media_root: PathBuf,
}

impl TestApp {
    pub fn router(&self) -> axum::Router {
        build_router(HttpState {
            services: Arc::clone(&self.services),
            options: RouterOptions {
                allowed_origins: Vec::new(),
                max_upload_bytes: 1024 * 1024,
                media_root: self.media_root.clone(),
                media_public_url: "/media".into(),
            },
        })
    }

    pub async fn author(&self, full_name: &str) -> AuthorDto {
        self.services
            .author_commands
            .create_author(author_command(full_name))
            .await
            .expect("create author")
    }

    pub async fn category(&self, name: &str) -> CategoryDto {
        self.services
            .category_commands
            .create_category(category_command(name))
            .await
            .expect("create category")
    }

    pub async fn post(&self, builder: PostBuilder) -> PostDto {
        self.services
            .post_commands
            .create_post(builder.build())
            .await
            .expect("create post")
    }
}

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid date")
}

/// Services over a fresh in-memory store, cache and media directory.
pub fn test_app() -> TestApp {
    let cache = Arc::new(InMemoryLookupCache::new());
    let clock = Arc::new(ManualClock::new(date(2024, 1, 15)));
    let media_root = std::env::temp_dir().join(format!("quill-test-{}", uuid::Uuid::new_v4()));

    let lookup: Arc<LookupCachePort> = cache.clone();
    let media: Arc<MediaStorePort> = Arc::new(LocalMediaStore::new(media_root.clone(), "/media"));
    let clock_port: Arc<ClockPort> = clock.clone();
    let slugger: Arc<SlugGeneratorPort> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        memory_repositories(InMemoryStore::new()),
        lookup,
        Duration::from_secs(60),
        media,
        clock_port,
        slugger,
    ));

    TestApp {
        services,
        cache,
        clock,
        media_root,
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024)
        .await
        .expect("read body");
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json: Value =
        serde_json::from_slice(&body_bytes).expect("expected valid json body for error");
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(
        !msg_field.is_empty(),
        "expected non-empty message field in ErrorResponse"
    );
}
