use crate::domain::author::entity::{Author, AuthorItem, AuthorUpdate, NewAuthor};
use crate::domain::errors::DomainResult;
use crate::domain::pagination::{PageRequest, PagedList};
use crate::domain::value_objects::{AuthorId, Slug};
use async_trait::async_trait;

#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn find_by_id(&self, id: AuthorId) -> DomainResult<Option<Author>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Author>>;
    /// Ordered by full name.
    async fn list(&self) -> DomainResult<Vec<AuthorItem>>;
    async fn page(
        &self,
        name: Option<&str>,
        request: PageRequest,
    ) -> DomainResult<PagedList<AuthorItem>>;
    /// Authors with the most published posts first.
    async fn popular(&self, limit: u32) -> DomainResult<Vec<AuthorItem>>;
    async fn slug_exists(&self, slug: &Slug, exclude: Option<AuthorId>) -> DomainResult<bool>;
    async fn insert(&self, author: NewAuthor) -> DomainResult<Author>;
    async fn update(&self, update: AuthorUpdate) -> DomainResult<Option<Author>>;
    /// Fails with `Conflict` while the author still owns posts.
    async fn delete(&self, id: AuthorId) -> DomainResult<bool>;
    async fn set_image_url(&self, id: AuthorId, image_url: Option<String>) -> DomainResult<bool>;
}
