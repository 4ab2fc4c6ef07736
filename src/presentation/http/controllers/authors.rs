// src/presentation/http/controllers/authors.rs
use crate::application::{
    commands::authors::AuthorCommand,
    dto::{AuthorDto, PagedResponse, PostDto},
};
use crate::presentation::http::controllers::published_posts;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::presentation::http::openapi::SlugAvailabilityResponse;
use crate::presentation::http::params::{PagingParams, PostFilterParams, SlugAvailabilityParams};
use crate::presentation::http::state::HttpState;
use crate::presentation::http::uploads::read_upload;
use axum::{Extension, Json, extract::Multipart, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorRequest {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub joined_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<AuthorRequest> for AuthorCommand {
    fn from(value: AuthorRequest) -> Self {
        Self {
            full_name: value.full_name,
            email: value.email,
            slug: value.slug,
            joined_date: value.joined_date,
            notes: value.notes,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/authors",
    responses(
        (status = 200, description = "All authors by name", body = Vec<AuthorDto>)
    ),
    tag = "Authors"
)]
pub async fn list_authors(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<AuthorDto>>> {
    state
        .services
        .author_queries
        .list_authors()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/authors/page",
    params(PagingParams),
    responses(
        (status = 200, description = "One page of authors", body = PagedResponse<AuthorDto>)
    ),
    tag = "Authors"
)]
pub async fn page_authors(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<PagingParams>,
) -> HttpResult<Json<PagedResponse<AuthorDto>>> {
    state
        .services
        .author_queries
        .page_authors(params.name(), params.page_request())
        .await
        .into_http()
        .map(PagedResponse::from_page)
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/authors/best/{limit}",
    params(("limit" = u32, Path, description = "Clamped to 1..=100")),
    responses(
        (status = 200, description = "Authors with the most published posts", body = Vec<AuthorDto>)
    ),
    tag = "Authors"
)]
pub async fn best_authors(
    Extension(state): Extension<HttpState>,
    ApiPath(limit): ApiPath<u32>,
) -> HttpResult<Json<Vec<AuthorDto>>> {
    state
        .services
        .author_queries
        .popular_authors(limit)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/authors/slug-available",
    params(SlugAvailabilityParams),
    responses(
        (status = 200, description = "Whether the slug is free", body = SlugAvailabilityResponse)
    ),
    tag = "Authors"
)]
pub async fn author_slug_available(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<SlugAvailabilityParams>,
) -> HttpResult<Json<SlugAvailabilityResponse>> {
    let available = state
        .services
        .author_queries
        .author_slug_available(&params.slug, params.exclude_id)
        .await
        .into_http()?;
    Ok(Json(SlugAvailabilityResponse {
        slug: params.slug,
        available,
    }))
}

#[utoipa::path(
    get,
    path = "/api/authors/{id}",
    params(("id" = i64, Path)),
    responses(
        (status = 200, description = "Author", body = AuthorDto),
        (status = 404, description = "Unknown author", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Authors"
)]
pub async fn get_author(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<Json<AuthorDto>> {
    state
        .services
        .author_queries
        .get_author_by_id(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/authors/by-slug/{slug}",
    params(("slug" = String, Path)),
    responses(
        (status = 200, description = "Author", body = AuthorDto),
        (status = 404, description = "Unknown author", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Authors"
)]
pub async fn get_author_by_slug(
    Extension(state): Extension<HttpState>,
    ApiPath(slug): ApiPath<String>,
) -> HttpResult<Json<AuthorDto>> {
    state
        .services
        .author_queries
        .get_author_by_slug(&slug)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/authors/by-slug/{slug}/posts",
    params(("slug" = String, Path), PostFilterParams),
    responses(
        (status = 200, description = "Published posts by the author", body = PagedResponse<PostDto>),
        (status = 404, description = "Unknown author", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Authors"
)]
pub async fn author_posts(
    Extension(state): Extension<HttpState>,
    ApiPath(slug): ApiPath<String>,
    ApiQuery(params): ApiQuery<PostFilterParams>,
) -> HttpResult<Json<PagedResponse<PostDto>>> {
    let author = state
        .services
        .author_queries
        .get_author_by_slug(&slug)
        .await
        .into_http()?;
    published_posts(&state, params, |query| query.with_author_slug(author.slug))
        .await
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/authors",
    request_body = AuthorRequest,
    responses(
        (status = 201, description = "Author created", body = AuthorDto),
        (status = 400, description = "Validation failed", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug already in use", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Authors"
)]
pub async fn create_author(
    Extension(state): Extension<HttpState>,
    ApiJson(payload): ApiJson<AuthorRequest>,
) -> HttpResult<(StatusCode, Json<AuthorDto>)> {
    let created = state
        .services
        .author_commands
        .create_author(payload.into())
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/authors/{id}",
    params(("id" = i64, Path)),
    request_body = AuthorRequest,
    responses(
        (status = 200, description = "Author updated", body = AuthorDto),
        (status = 404, description = "Unknown author", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug already in use", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Authors"
)]
pub async fn update_author(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<AuthorRequest>,
) -> HttpResult<Json<AuthorDto>> {
    state
        .services
        .author_commands
        .update_author(id, payload.into())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/authors/{id}",
    params(("id" = i64, Path)),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Unknown author", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Author still owns posts", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Authors"
)]
pub async fn delete_author(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .author_commands
        .delete_author(id)
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/authors/{id}/avatar",
    params(("id" = i64, Path)),
    request_body(content = crate::presentation::http::uploads::ImageUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Avatar replaced", body = AuthorDto),
        (status = 400, description = "Missing or non-image file", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown author", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Authors"
)]
pub async fn upload_avatar(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
    multipart: Multipart,
) -> HttpResult<Json<AuthorDto>> {
    let upload = read_upload(multipart).await?;
    state
        .services
        .author_commands
        .set_author_image(id, upload.data, &upload.file_name, &upload.content_type)
        .await
        .into_http()
        .map(Json)
}
