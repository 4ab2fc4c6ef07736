// src/presentation/http/openapi.rs
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::server::Server;
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};

pub const DEFAULT_SNAPSHOT_PATH: &str = "openapi/openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SlugAvailabilityResponse {
    pub slug: String,
    pub available: bool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::posts::list_posts,
        crate::presentation::http::controllers::posts::count_posts,
        crate::presentation::http::controllers::posts::featured_posts,
        crate::presentation::http::controllers::posts::random_posts,
        crate::presentation::http::controllers::posts::archives,
        crate::presentation::http::controllers::posts::post_slug_available,
        crate::presentation::http::controllers::posts::get_post,
        crate::presentation::http::controllers::posts::get_post_by_slug,
        crate::presentation::http::controllers::posts::get_post_by_permalink,
        crate::presentation::http::controllers::posts::create_post,
        crate::presentation::http::controllers::posts::update_post,
        crate::presentation::http::controllers::posts::delete_post,
        crate::presentation::http::controllers::posts::toggle_published,
        crate::presentation::http::controllers::posts::record_view,
        crate::presentation::http::controllers::posts::upload_picture,
        crate::presentation::http::controllers::categories::list_categories,
        crate::presentation::http::controllers::categories::menu_categories,
        crate::presentation::http::controllers::categories::page_categories,
        crate::presentation::http::controllers::categories::category_slug_available,
        crate::presentation::http::controllers::categories::get_category,
        crate::presentation::http::controllers::categories::get_category_by_slug,
        crate::presentation::http::controllers::categories::category_posts,
        crate::presentation::http::controllers::categories::create_category,
        crate::presentation::http::controllers::categories::update_category,
        crate::presentation::http::controllers::categories::delete_category,
        crate::presentation::http::controllers::categories::toggle_menu,
        crate::presentation::http::controllers::tags::list_tags,
        crate::presentation::http::controllers::tags::page_tags,
        crate::presentation::http::controllers::tags::tag_slug_available,
        crate::presentation::http::controllers::tags::get_tag,
        crate::presentation::http::controllers::tags::get_tag_by_slug,
        crate::presentation::http::controllers::tags::tag_posts,
        crate::presentation::http::controllers::tags::create_tag,
        crate::presentation::http::controllers::tags::update_tag,
        crate::presentation::http::controllers::tags::delete_tag,
        crate::presentation::http::controllers::authors::list_authors,
        crate::presentation::http::controllers::authors::page_authors,
        crate::presentation::http::controllers::authors::best_authors,
        crate::presentation::http::controllers::authors::author_slug_available,
        crate::presentation::http::controllers::authors::get_author,
        crate::presentation::http::controllers::authors::get_author_by_slug,
        crate::presentation::http::controllers::authors::author_posts,
        crate::presentation::http::controllers::authors::create_author,
        crate::presentation::http::controllers::authors::update_author,
        crate::presentation::http::controllers::authors::delete_author,
        crate::presentation::http::controllers::authors::upload_avatar,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            CountResponse,
            SlugAvailabilityResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::posts::PostRequest,
            crate::presentation::http::controllers::categories::CategoryRequest,
            crate::presentation::http::controllers::tags::TagRequest,
            crate::presentation::http::controllers::authors::AuthorRequest,
            crate::application::dto::PostDto,
            crate::application::dto::EntityRefDto,
            crate::application::dto::PublishStateDto,
            crate::application::dto::ArchiveEntryDto,
            crate::application::dto::CategoryDto,
            crate::application::dto::TagDto,
            crate::application::dto::AuthorDto
        )
    ),
    tags(
        (name = "Posts", description = "Posts, filtered listings and statistics"),
        (name = "Categories", description = "Category management and category archives"),
        (name = "Tags", description = "Tag management and tag archives"),
        (name = "Authors", description = "Author management and author archives"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "Quill API",
        description = "Blogging backend: posts, categories, tags and authors",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if !urls.iter().any(|url| url == "http://localhost:3000") {
            urls.push("http://localhost:3000".to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

pub async fn serve_openapi() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

pub fn docs_router() -> Router {
    let redoc = Redoc::with_url("/redoc", ApiDoc::openapi());
    Router::new()
        .route("/openapi.json", get(serve_openapi))
        .merge(redoc)
        .route("/", get(|| async { Redirect::permanent("/redoc") }))
}

/// Writes the document to `OPENAPI_SNAPSHOT_PATH` or [`DEFAULT_SNAPSHOT_PATH`].
pub fn write_openapi_snapshot() -> std::io::Result<()> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(())
}
