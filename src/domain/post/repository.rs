use crate::domain::errors::DomainResult;
use crate::domain::pagination::{PageRequest, PagedList};
use crate::domain::post::entity::{MonthlyPostCount, NewPost, Post, PostUpdate};
use crate::domain::post::ordering::PostOrdering;
use crate::domain::post::query::PostQuery;
use crate::domain::value_objects::{PostId, Slug};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait PostWriteRepository: Send + Sync {
    async fn insert(&self, post: NewPost) -> DomainResult<Post>;
    /// `None` when no post has the given id.
    async fn update(&self, update: PostUpdate) -> DomainResult<Option<Post>>;
    async fn delete(&self, id: PostId) -> DomainResult<bool>;
    /// Returns the new flag, or `None` when the post does not exist.
    async fn toggle_published(
        &self,
        id: PostId,
        modified_at: DateTime<Utc>,
    ) -> DomainResult<Option<bool>>;
    /// Applied as a relative update in storage so concurrent hits are never lost.
    async fn increment_view_count(&self, id: PostId) -> DomainResult<bool>;
    async fn set_image_url(&self, id: PostId, image_url: Option<String>) -> DomainResult<bool>;
}

#[async_trait]
pub trait PostReadRepository: Send + Sync {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Post>>;
    async fn find_by_posted_slug(
        &self,
        year: i32,
        month: u32,
        slug: &Slug,
    ) -> DomainResult<Option<Post>>;
    async fn find_one(&self, query: &PostQuery) -> DomainResult<Option<Post>>;
    async fn list(&self, query: &PostQuery, ordering: PostOrdering) -> DomainResult<Vec<Post>>;
    async fn count(&self, query: &PostQuery) -> DomainResult<u64>;
    async fn page(
        &self,
        query: &PostQuery,
        request: PageRequest,
        ordering: PostOrdering,
    ) -> DomainResult<PagedList<Post>>;
    /// True when a post other than `exclude` already uses `slug`.
    async fn slug_exists(&self, slug: &Slug, exclude: Option<PostId>) -> DomainResult<bool>;
    async fn popular(&self, limit: u32) -> DomainResult<Vec<Post>>;
    async fn random(&self, limit: u32) -> DomainResult<Vec<Post>>;
    async fn archives(&self, months: u32) -> DomainResult<Vec<MonthlyPostCount>>;
}
