// tests/openapi_integration.rs
use axum::http::StatusCode;
use quill_core::presentation::http::openapi::{ApiDoc, docs_router};
use tower::ServiceExt; // for oneshot
use utoipa::OpenApi;

mod support;
use support::{empty_request, json_body};

#[tokio::test]
async fn openapi_json_lists_the_post_routes() {
    let resp = docs_router()
        .oneshot(empty_request("GET", "/openapi.json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = json_body(resp).await;
    let paths = doc["paths"].as_object().expect("paths object");
    for path in [
        "/api/posts",
        "/api/posts/{id}",
        "/api/posts/permalink/{year}/{month}/{slug}",
        "/api/categories/by-slug/{slug}/posts",
        "/api/authors/{id}/avatar",
        "/health",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}

#[tokio::test]
async fn root_redirects_to_redoc() {
    let resp = docs_router()
        .oneshot(empty_request("GET", "/"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PERMANENT_REDIRECT);

    let resp = docs_router()
        .oneshot(empty_request("GET", "/redoc"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[test]
fn paged_schema_is_generated() {
    let doc = ApiDoc::openapi();
    let json = serde_json::to_value(&doc).unwrap();
    let schemas = json["components"]["schemas"].as_object().unwrap();
    assert!(schemas.contains_key("PostDto"));
    assert!(schemas.contains_key("ErrorResponse"));
}
