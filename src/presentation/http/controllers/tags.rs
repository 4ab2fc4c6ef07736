// src/presentation/http/controllers/tags.rs
use crate::application::{
    commands::tags::TagCommand,
    dto::{TagDto, PagedResponse, PostDto},
};
use crate::presentation::http::controllers::published_posts;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::presentation::http::openapi::SlugAvailabilityResponse;
use crate::presentation::http::params::{PagingParams, PostFilterParams, SlugAvailabilityParams};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagRequest {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<TagRequest> for TagCommand {
    fn from(value: TagRequest) -> Self {
        Self {
            name: value.name,
            slug: value.slug,
            description: value.description,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/tags",
    responses(
        (status = 200, description = "All tags with published post counts", body = Vec<TagDto>)
    ),
    tag = "Tags"
)]
pub async fn list_tags(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<TagDto>>> {
    state
        .services
        .tag_queries
        .list_tags()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/tags/page",
    params(PagingParams),
    responses(
        (status = 200, description = "One page of tags", body = PagedResponse<TagDto>)
    ),
    tag = "Tags"
)]
pub async fn page_tags(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<PagingParams>,
) -> HttpResult<Json<PagedResponse<TagDto>>> {
    state
        .services
        .tag_queries
        .page_tags(params.name(), params.page_request())
        .await
        .into_http()
        .map(PagedResponse::from_page)
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/tags/slug-available",
    params(SlugAvailabilityParams),
    responses(
        (status = 200, description = "Whether the slug is free", body = SlugAvailabilityResponse)
    ),
    tag = "Tags"
)]
pub async fn tag_slug_available(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<SlugAvailabilityParams>,
) -> HttpResult<Json<SlugAvailabilityResponse>> {
    let available = state
        .services
        .tag_queries
        .tag_slug_available(&params.slug, params.exclude_id)
        .await
        .into_http()?;
    Ok(Json(SlugAvailabilityResponse {
        slug: params.slug,
        available,
    }))
}

#[utoipa::path(
    get,
    path = "/api/tags/{id}",
    params(("id" = i64, Path)),
    responses(
        (status = 200, description = "Tag", body = TagDto),
        (status = 404, description = "Unknown tag", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Tags"
)]
pub async fn get_tag(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<Json<TagDto>> {
    state
        .services
        .tag_queries
        .get_tag_by_id(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/tags/by-slug/{slug}",
    params(("slug" = String, Path)),
    responses(
        (status = 200, description = "Tag", body = TagDto),
        (status = 404, description = "Unknown tag", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Tags"
)]
pub async fn get_tag_by_slug(
    Extension(state): Extension<HttpState>,
    ApiPath(slug): ApiPath<String>,
) -> HttpResult<Json<TagDto>> {
    state
        .services
        .tag_queries
        .get_tag_by_slug(&slug)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/tags/by-slug/{slug}/posts",
    params(("slug" = String, Path), PostFilterParams),
    responses(
        (status = 200, description = "Published posts with the tag", body = PagedResponse<PostDto>),
        (status = 404, description = "Unknown tag", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Tags"
)]
pub async fn tag_posts(
    Extension(state): Extension<HttpState>,
    ApiPath(slug): ApiPath<String>,
    ApiQuery(params): ApiQuery<PostFilterParams>,
) -> HttpResult<Json<PagedResponse<PostDto>>> {
    let tag = state
        .services
        .tag_queries
        .get_tag_by_slug(&slug)
        .await
        .into_http()?;
    published_posts(&state, params, |query| query.with_tag_slug(tag.slug))
        .await
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/tags",
    request_body = TagRequest,
    responses(
        (status = 201, description = "Tag created", body = TagDto),
        (status = 400, description = "Validation failed", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug already in use", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Tags"
)]
pub async fn create_tag(
    Extension(state): Extension<HttpState>,
    ApiJson(payload): ApiJson<TagRequest>,
) -> HttpResult<(StatusCode, Json<TagDto>)> {
    let created = state
        .services
        .tag_commands
        .create_tag(payload.into())
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/tags/{id}",
    params(("id" = i64, Path)),
    request_body = TagRequest,
    responses(
        (status = 200, description = "Tag updated", body = TagDto),
        (status = 404, description = "Unknown tag", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug already in use", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Tags"
)]
pub async fn update_tag(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<TagRequest>,
) -> HttpResult<Json<TagDto>> {
    state
        .services
        .tag_commands
        .update_tag(id, payload.into())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/tags/{id}",
    params(("id" = i64, Path)),
    responses(
        (status = 204, description = "Tag deleted and detached from its posts"),
        (status = 404, description = "Unknown tag", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Tags"
)]
pub async fn delete_tag(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .tag_commands
        .delete_tag(id)
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}
