// tests/e2e_http.rs
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::util::ServiceExt as _;

mod support;
use support::{
    PostBuilder, assert_error_response, empty_request, json_body, json_request, test_app,
};

#[tokio::test]
async fn health_returns_ok() {
    let app = test_app().router();
    let resp = app.oneshot(empty_request("GET", "/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn create_then_fetch_a_post() {
    let app = test_app();
    let author = app.author("Donald Knuth").await;
    let router = app.router();

    let body = json!({
        "title": "Literate Programming",
        "short_description": "Programs as essays",
        "description": "Write for humans first.",
        "author_id": author.id,
        "tags": ["TeX", "Style"],
        "published": true
    });
    let resp = router
        .clone()
        .oneshot(json_request("POST", "/api/posts", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = json_body(resp).await;
    assert_eq!(created["slug"], "literate-programming");
    assert_eq!(created["author"]["slug"], "donald-knuth");
    assert_eq!(created["tags"].as_array().map(Vec::len), Some(2));

    let id = created["id"].as_i64().unwrap();
    let resp = router
        .clone()
        .oneshot(empty_request("GET", &format!("/api/posts/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = router
        .oneshot(empty_request(
            "GET",
            "/api/posts/permalink/2024/1/literate-programming",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["id"], id);
}

#[tokio::test]
async fn duplicate_slug_returns_409() {
    let app = test_app();
    let author = app.author("Donald Knuth").await;
    app.post(PostBuilder::new("Taken", author.id)).await;

    let body = json!({
        "title": "Something else",
        "slug": "taken",
        "short_description": "s",
        "description": "d",
        "author_id": author.id
    });
    let resp = app
        .router()
        .oneshot(json_request("POST", "/api/posts", &body))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::CONFLICT, "Conflict").await;
}

#[tokio::test]
async fn unknown_post_returns_404() {
    let resp = test_app()
        .router()
        .oneshot(empty_request("GET", "/api/posts/4242"))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}

#[tokio::test]
async fn malformed_input_returns_400() {
    let router = test_app().router();

    let resp = router
        .clone()
        .oneshot(empty_request("GET", "/api/posts/abc"))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;

    let resp = router
        .clone()
        .oneshot(empty_request("GET", "/api/posts?sort_column=rank"))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;

    let resp = router
        .oneshot(json_request("POST", "/api/posts", &json!({ "title": 1 })))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn listing_paginates_and_filters() {
    let app = test_app();
    let author = app.author("Donald Knuth").await;
    for i in 0..12 {
        let builder = PostBuilder::new(format!("Volume {i}"), author.id);
        app.post(if i < 11 { builder.published() } else { builder })
            .await;
    }
    let router = app.router();

    let resp = router
        .clone()
        .oneshot(empty_request(
            "GET",
            "/api/posts?published_only=true&page_number=2&page_size=5",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page = json_body(resp).await;
    assert_eq!(page["total_count"], 11);
    assert_eq!(page["total_pages"], 3);
    assert_eq!(page["page_number"], 2);
    assert_eq!(page["items"].as_array().map(Vec::len), Some(5));
    assert_eq!(page["has_previous_page"], true);
    assert_eq!(page["has_next_page"], true);

    let resp = router
        .oneshot(empty_request("GET", "/api/posts/count?not_published=true"))
        .await
        .unwrap();
    assert_eq!(json_body(resp).await, json!({ "count": 1 }));
}

#[tokio::test]
async fn category_archive_shows_only_published_posts() {
    let app = test_app();
    let author = app.author("Donald Knuth").await;
    let category = app.category("Algorithms").await;
    app.post(
        PostBuilder::new("Sorting", author.id)
            .category(category.id)
            .published(),
    )
    .await;
    app.post(PostBuilder::new("Searching", author.id).category(category.id))
        .await;
    let router = app.router();

    let resp = router
        .clone()
        .oneshot(empty_request(
            "GET",
            "/api/categories/by-slug/algorithms/posts?not_published=true",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page = json_body(resp).await;
    assert_eq!(page["total_count"], 1);
    assert_eq!(page["items"][0]["title"], "Sorting");

    let resp = router
        .oneshot(empty_request("GET", "/api/categories/by-slug/missing/posts"))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}

#[tokio::test]
async fn toggle_and_views_endpoints() {
    let app = test_app();
    let author = app.author("Donald Knuth").await;
    let post = app.post(PostBuilder::new("Counters", author.id)).await;
    let router = app.router();

    let resp = router
        .clone()
        .oneshot(empty_request(
            "POST",
            &format!("/api/posts/{}/toggle-published", post.id),
        ))
        .await
        .unwrap();
    assert_eq!(
        json_body(resp).await,
        json!({ "id": post.id, "published": true })
    );

    for _ in 0..3 {
        let resp = router
            .clone()
            .oneshot(empty_request("POST", &format!("/api/posts/{}/views", post.id)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    let resp = router
        .oneshot(empty_request("GET", "/api/posts/featured/5"))
        .await
        .unwrap();
    let featured = json_body(resp).await;
    assert_eq!(featured[0]["view_count"], 3);
}

#[tokio::test]
async fn author_delete_conflicts_while_posts_exist() {
    let app = test_app();
    let author = app.author("Donald Knuth").await;
    app.post(PostBuilder::new("Owned", author.id)).await;

    let resp = app
        .router()
        .oneshot(empty_request("DELETE", &format!("/api/authors/{}", author.id)))
        .await
        .unwrap();
    assert_error_response(resp, StatusCode::CONFLICT, "Conflict").await;
}

#[tokio::test]
async fn slug_availability_endpoint() {
    let app = test_app();
    app.category("Compilers").await;
    let router = app.router();

    let resp = router
        .clone()
        .oneshot(empty_request(
            "GET",
            "/api/categories/slug-available?slug=compilers",
        ))
        .await
        .unwrap();
    assert_eq!(
        json_body(resp).await,
        json!({ "slug": "compilers", "available": false })
    );

    let resp = router
        .oneshot(empty_request("GET", "/api/tags/slug-available?slug=fresh"))
        .await
        .unwrap();
    assert_eq!(json_body(resp).await["available"], true);
}

#[tokio::test]
async fn avatar_upload_is_served_from_media_url() {
    let app = test_app();
    let author = app.author("Donald Knuth").await;
    let router = app.router();

    let boundary = "quill-boundary";
    let mut payload = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"me.png\"\r\n\
         Content-Type: image/png\r\n\r\n"
    )
    .into_bytes();
    payload.extend_from_slice(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR");
    payload.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    let req = Request::builder()
        .method("POST")
        .uri(format!("/api/authors/{}/avatar", author.id))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(payload))
        .unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = json_body(resp).await;
    let url = updated["image_url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/media/") && url.ends_with(".png"));

    let resp = router.oneshot(empty_request("GET", &url)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let _ = tokio::fs::remove_dir_all(&app.media_root).await;
}

#[tokio::test]
async fn markup_disguised_as_an_image_is_rejected() {
    let app = test_app();
    let author = app.author("Donald Knuth").await;

    let boundary = "quill-boundary";
    let payload = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"evil.html\"\r\n\
         Content-Type: image/png\r\n\r\n\
         <script>alert(1)</script>\r\n\
         --{boundary}--\r\n"
    );
    let req = Request::builder()
        .method("POST")
        .uri(format!("/api/authors/{}/avatar", author.id))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(payload))
        .unwrap();
    let resp = app.router().oneshot(req).await.unwrap();
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;

    let _ = tokio::fs::remove_dir_all(&app.media_root).await;
}
