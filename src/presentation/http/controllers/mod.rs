// src/presentation/http/controllers/mod.rs
pub mod authors;
pub mod categories;
pub mod posts;
pub mod tags;

use crate::application::dto::{PagedResponse, PostDto};
use crate::domain::post::PostQuery;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::params::PostFilterParams;
use crate::presentation::http::state::HttpState;

/// Published posts narrowed by `scope` on top of the caller's filters.
pub(crate) async fn published_posts(
    state: &HttpState,
    params: PostFilterParams,
    scope: impl FnOnce(PostQuery) -> PostQuery,
) -> HttpResult<PagedResponse<PostDto>> {
    let (query, page, ordering) = params.into_parts()?;
    let query = PostQuery {
        not_published: false,
        ..scope(query).published_only()
    };
    let posts = state
        .services
        .post_queries
        .list_posts(&query, page, ordering)
        .await
        .into_http()?;
    Ok(PagedResponse::from_page(posts))
}
