// src/presentation/http/routes.rs
use crate::presentation::http::state::{HttpState, RouterOptions};
use crate::presentation::http::{
    controllers::{authors, categories, posts, tags},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

pub fn build_router(state: HttpState) -> Router {
    let options = state.options.clone();
    let upload_limit = DefaultBodyLimit::max(options.max_upload_bytes);

    let mut router = Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route(
            "/api/posts",
            get(posts::list_posts).post(posts::create_post),
        )
        .route("/api/posts/count", get(posts::count_posts))
        .route("/api/posts/featured/{limit}", get(posts::featured_posts))
        .route("/api/posts/random/{limit}", get(posts::random_posts))
        .route("/api/posts/archives/{months}", get(posts::archives))
        .route("/api/posts/slug-available", get(posts::post_slug_available))
        .route("/api/posts/by-slug/{slug}", get(posts::get_post_by_slug))
        .route(
            "/api/posts/permalink/{year}/{month}/{slug}",
            get(posts::get_post_by_permalink),
        )
        .route(
            "/api/posts/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/api/posts/{id}/toggle-published",
            post(posts::toggle_published),
        )
        .route("/api/posts/{id}/views", post(posts::record_view))
        .route(
            "/api/posts/{id}/picture",
            post(posts::upload_picture).layer(upload_limit.clone()),
        )
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/api/categories/menu", get(categories::menu_categories))
        .route("/api/categories/page", get(categories::page_categories))
        .route(
            "/api/categories/slug-available",
            get(categories::category_slug_available),
        )
        .route(
            "/api/categories/by-slug/{slug}",
            get(categories::get_category_by_slug),
        )
        .route(
            "/api/categories/by-slug/{slug}/posts",
            get(categories::category_posts),
        )
        .route(
            "/api/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route(
            "/api/categories/{id}/toggle-menu",
            post(categories::toggle_menu),
        )
        .route("/api/tags", get(tags::list_tags).post(tags::create_tag))
        .route("/api/tags/page", get(tags::page_tags))
        .route("/api/tags/slug-available", get(tags::tag_slug_available))
        .route("/api/tags/by-slug/{slug}", get(tags::get_tag_by_slug))
        .route("/api/tags/by-slug/{slug}/posts", get(tags::tag_posts))
        .route(
            "/api/tags/{id}",
            get(tags::get_tag)
                .put(tags::update_tag)
                .delete(tags::delete_tag),
        )
        .route(
            "/api/authors",
            get(authors::list_authors).post(authors::create_author),
        )
        .route("/api/authors/page", get(authors::page_authors))
        .route("/api/authors/best/{limit}", get(authors::best_authors))
        .route(
            "/api/authors/slug-available",
            get(authors::author_slug_available),
        )
        .route(
            "/api/authors/by-slug/{slug}",
            get(authors::get_author_by_slug),
        )
        .route(
            "/api/authors/by-slug/{slug}/posts",
            get(authors::author_posts),
        )
        .route(
            "/api/authors/{id}",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        )
        .route(
            "/api/authors/{id}/avatar",
            post(authors::upload_avatar).layer(upload_limit),
        );

    if options.media_public_url.starts_with('/') && options.media_public_url.len() > 1 {
        router = router.nest_service(
            options.media_public_url.trim_end_matches('/'),
            ServeDir::new(&options.media_root),
        );
    }

    router
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&options))
        .layer(Extension(state))
}

fn cors_layer(options: &RouterOptions) -> CorsLayer {
    let origins: Vec<HeaderValue> = options
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
