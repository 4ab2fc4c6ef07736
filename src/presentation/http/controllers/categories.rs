// src/presentation/http/controllers/categories.rs
use crate::application::{
    commands::categories::CategoryCommand,
    dto::{CategoryDto, PagedResponse, PostDto},
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
pub struct CategoryRequest {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub show_on_menu: bool,
}

impl From<CategoryRequest> for CategoryCommand {
    fn from(value: CategoryRequest) -> Self {
        Self {
            name: value.name,
            slug: value.slug,
            description: value.description,
            show_on_menu: value.show_on_menu,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories with published post counts", body = Vec<CategoryDto>)
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<CategoryDto>>> {
    state
        .services
        .category_queries
        .list_categories(false)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/categories/menu",
    responses(
        (status = 200, description = "Categories shown on the menu", body = Vec<CategoryDto>)
    ),
    tag = "Categories"
)]
pub async fn menu_categories(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<CategoryDto>>> {
    state
        .services
        .category_queries
        .list_categories(true)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/categories/page",
    params(PagingParams),
    responses(
        (status = 200, description = "One page of categories", body = PagedResponse<CategoryDto>)
    ),
    tag = "Categories"
)]
pub async fn page_categories(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<PagingParams>,
) -> HttpResult<Json<PagedResponse<CategoryDto>>> {
    state
        .services
        .category_queries
        .page_categories(params.name(), params.page_request())
        .await
        .into_http()
        .map(PagedResponse::from_page)
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/categories/slug-available",
    params(SlugAvailabilityParams),
    responses(
        (status = 200, description = "Whether the slug is free", body = SlugAvailabilityResponse)
    ),
    tag = "Categories"
)]
pub async fn category_slug_available(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<SlugAvailabilityParams>,
) -> HttpResult<Json<SlugAvailabilityResponse>> {
    let available = state
        .services
        .category_queries
        .category_slug_available(&params.slug, params.exclude_id)
        .await
        .into_http()?;
    Ok(Json(SlugAvailabilityResponse {
        slug: params.slug,
        available,
    }))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = i64, Path)),
    responses(
        (status = 200, description = "Category", body = CategoryDto),
        (status = 404, description = "Unknown category", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn get_category(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<Json<CategoryDto>> {
    state
        .services
        .category_queries
        .get_category_by_id(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/categories/by-slug/{slug}",
    params(("slug" = String, Path)),
    responses(
        (status = 200, description = "Category", body = CategoryDto),
        (status = 404, description = "Unknown category", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn get_category_by_slug(
    Extension(state): Extension<HttpState>,
    ApiPath(slug): ApiPath<String>,
) -> HttpResult<Json<CategoryDto>> {
    state
        .services
        .category_queries
        .get_category_by_slug(&slug)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/categories/by-slug/{slug}/posts",
    params(("slug" = String, Path), PostFilterParams),
    responses(
        (status = 200, description = "Published posts in the category", body = PagedResponse<PostDto>),
        (status = 404, description = "Unknown category", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn category_posts(
    Extension(state): Extension<HttpState>,
    ApiPath(slug): ApiPath<String>,
    ApiQuery(params): ApiQuery<PostFilterParams>,
) -> HttpResult<Json<PagedResponse<PostDto>>> {
    let category = state
        .services
        .category_queries
        .get_category_by_slug(&slug)
        .await
        .into_http()?;
    published_posts(&state, params, |query| query.with_category_slug(category.slug))
        .await
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryDto),
        (status = 400, description = "Validation failed", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug already in use", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn create_category(
    Extension(state): Extension<HttpState>,
    ApiJson(payload): ApiJson<CategoryRequest>,
) -> HttpResult<(StatusCode, Json<CategoryDto>)> {
    let created = state
        .services
        .category_commands
        .create_category(payload.into())
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = i64, Path)),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryDto),
        (status = 404, description = "Unknown category", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug already in use", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn update_category(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<CategoryRequest>,
) -> HttpResult<Json<CategoryDto>> {
    state
        .services
        .category_commands
        .update_category(id, payload.into())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = i64, Path)),
    responses(
        (status = 204, description = "Category deleted; its posts become uncategorized"),
        (status = 404, description = "Unknown category", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn delete_category(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .category_commands
        .delete_category(id)
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/categories/{id}/toggle-menu",
    params(("id" = i64, Path)),
    responses(
        (status = 200, description = "Category with the flipped menu flag", body = CategoryDto),
        (status = 404, description = "Unknown category", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn toggle_menu(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<Json<CategoryDto>> {
    state
        .services
        .category_commands
        .toggle_show_on_menu(id)
        .await
        .into_http()
        .map(Json)
}
