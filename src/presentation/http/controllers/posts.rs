// src/presentation/http/controllers/posts.rs
use crate::application::{
    commands::posts::{CreatePostCommand, UpdatePostCommand},
    dto::{ArchiveEntryDto, PagedResponse, PostDto, PublishStateDto},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::presentation::http::openapi::{CountResponse, SlugAvailabilityResponse};
use crate::presentation::http::params::{PostFilterParams, SlugAvailabilityParams};
use crate::presentation::http::state::HttpState;
use crate::presentation::http::uploads::read_upload;
use axum::{Extension, Json, extract::Multipart, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostRequest {
    pub title: String,
    pub short_description: String,
    pub description: String,
    /// Generated from the title when omitted on create; kept on update.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub meta: Option<String>,
    #[serde(default)]
    pub published: bool,
    pub author_id: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Tag names; unknown tags are created.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PostRequest {
    fn into_create(self) -> CreatePostCommand {
        CreatePostCommand {
            title: self.title,
            short_description: self.short_description,
            description: self.description,
            slug: self.slug,
            meta: self.meta,
            published: self.published,
            author_id: self.author_id,
            category_id: self.category_id,
            tags: self.tags,
        }
    }

    fn into_update(self, id: i64) -> UpdatePostCommand {
        UpdatePostCommand {
            id,
            title: self.title,
            short_description: self.short_description,
            description: self.description,
            slug: self.slug,
            meta: self.meta,
            published: self.published,
            author_id: self.author_id,
            category_id: self.category_id,
            tags: self.tags,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    params(PostFilterParams),
    responses(
        (status = 200, description = "One page of matching posts", body = PagedResponse<PostDto>),
        (status = 400, description = "Invalid filter or sort", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn list_posts(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<PostFilterParams>,
) -> HttpResult<Json<PagedResponse<PostDto>>> {
    let (query, page, ordering) = params.into_parts()?;
    state
        .services
        .post_queries
        .list_posts(&query, page, ordering)
        .await
        .into_http()
        .map(PagedResponse::from_page)
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/posts/count",
    params(PostFilterParams),
    responses(
        (status = 200, description = "Number of matching posts", body = CountResponse)
    ),
    tag = "Posts"
)]
pub async fn count_posts(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<PostFilterParams>,
) -> HttpResult<Json<CountResponse>> {
    let count = state
        .services
        .post_queries
        .count_posts(&params.query())
        .await
        .into_http()?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/api/posts/featured/{limit}",
    params(("limit" = u32, Path, description = "Clamped to 1..=100")),
    responses(
        (status = 200, description = "Most viewed published posts", body = Vec<PostDto>)
    ),
    tag = "Posts"
)]
pub async fn featured_posts(
    Extension(state): Extension<HttpState>,
    ApiPath(limit): ApiPath<u32>,
) -> HttpResult<Json<Vec<PostDto>>> {
    state
        .services
        .post_queries
        .popular_posts(limit)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/posts/random/{limit}",
    params(("limit" = u32, Path, description = "Clamped to 1..=100")),
    responses(
        (status = 200, description = "Random published posts", body = Vec<PostDto>)
    ),
    tag = "Posts"
)]
pub async fn random_posts(
    Extension(state): Extension<HttpState>,
    ApiPath(limit): ApiPath<u32>,
) -> HttpResult<Json<Vec<PostDto>>> {
    state
        .services
        .post_queries
        .random_posts(limit)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/posts/archives/{months}",
    params(("months" = u32, Path, description = "Clamped to 1..=120")),
    responses(
        (status = 200, description = "Published post counts per month, newest first", body = Vec<ArchiveEntryDto>)
    ),
    tag = "Posts"
)]
pub async fn archives(
    Extension(state): Extension<HttpState>,
    ApiPath(months): ApiPath<u32>,
) -> HttpResult<Json<Vec<ArchiveEntryDto>>> {
    state
        .services
        .post_queries
        .archives(months)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/posts/slug-available",
    params(SlugAvailabilityParams),
    responses(
        (status = 200, description = "Whether the slug is free", body = SlugAvailabilityResponse),
        (status = 400, description = "Malformed slug", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn post_slug_available(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<SlugAvailabilityParams>,
) -> HttpResult<Json<SlugAvailabilityResponse>> {
    let available = state
        .services
        .post_queries
        .post_slug_available(&params.slug, params.exclude_id)
        .await
        .into_http()?;
    Ok(Json(SlugAvailabilityResponse {
        slug: params.slug,
        available,
    }))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(("id" = i64, Path)),
    responses(
        (status = 200, description = "Post, draft or published", body = PostDto),
        (status = 404, description = "Unknown post", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn get_post(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<Json<PostDto>> {
    state
        .services
        .post_queries
        .get_post_by_id(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/posts/by-slug/{slug}",
    params(("slug" = String, Path)),
    responses(
        (status = 200, description = "Post", body = PostDto),
        (status = 404, description = "Unknown post", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn get_post_by_slug(
    Extension(state): Extension<HttpState>,
    ApiPath(slug): ApiPath<String>,
) -> HttpResult<Json<PostDto>> {
    state
        .services
        .post_queries
        .get_post_by_slug(&slug)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/posts/permalink/{year}/{month}/{slug}",
    params(
        ("year" = i32, Path),
        ("month" = u32, Path),
        ("slug" = String, Path)
    ),
    responses(
        (status = 200, description = "Published post", body = PostDto),
        (status = 404, description = "No published post at this permalink", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn get_post_by_permalink(
    Extension(state): Extension<HttpState>,
    ApiPath((year, month, slug)): ApiPath<(i32, u32, String)>,
) -> HttpResult<Json<PostDto>> {
    state
        .services
        .post_queries
        .get_post_by_permalink(year, month, &slug)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = PostRequest,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation failed", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown author or category", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug already in use", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn create_post(
    Extension(state): Extension<HttpState>,
    ApiJson(payload): ApiJson<PostRequest>,
) -> HttpResult<(StatusCode, Json<PostDto>)> {
    let created = state
        .services
        .post_commands
        .create_post(payload.into_create())
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    params(("id" = i64, Path)),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostDto),
        (status = 400, description = "Validation failed", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown post, author or category", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug already in use", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn update_post(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<PostRequest>,
) -> HttpResult<Json<PostDto>> {
    state
        .services
        .post_commands
        .update_post(payload.into_update(id))
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = i64, Path)),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 404, description = "Unknown post", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn delete_post(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .post_commands
        .delete_post(id)
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/toggle-published",
    params(("id" = i64, Path)),
    responses(
        (status = 200, description = "New publish state", body = PublishStateDto),
        (status = 404, description = "Unknown post", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn toggle_published(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<Json<PublishStateDto>> {
    state
        .services
        .post_commands
        .toggle_published(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/views",
    params(("id" = i64, Path)),
    responses(
        (status = 204, description = "View recorded"),
        (status = 404, description = "Unknown post", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn record_view(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .post_commands
        .record_view(id)
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/picture",
    params(("id" = i64, Path)),
    request_body(content = crate::presentation::http::uploads::ImageUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Cover image replaced", body = PostDto),
        (status = 400, description = "Missing or non-image file", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown post", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn upload_picture(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
    multipart: Multipart,
) -> HttpResult<Json<PostDto>> {
    let upload = read_upload(multipart).await?;
    state
        .services
        .post_commands
        .set_post_image(id, upload.data, &upload.file_name, &upload.content_type)
        .await
        .into_http()
        .map(Json)
}
