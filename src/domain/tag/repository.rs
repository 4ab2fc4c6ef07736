use crate::domain::errors::DomainResult;
use crate::domain::pagination::{PageRequest, PagedList};
use crate::domain::tag::entity::{NewTag, Tag, TagItem, TagUpdate};
use crate::domain::value_objects::{Slug, TagId};
use async_trait::async_trait;

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_id(&self, id: TagId) -> DomainResult<Option<Tag>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Tag>>;
    /// Ordered by name.
    async fn list(&self) -> DomainResult<Vec<TagItem>>;
    async fn page(&self, name: Option<&str>, request: PageRequest)
    -> DomainResult<PagedList<TagItem>>;
    async fn slug_exists(&self, slug: &Slug, exclude: Option<TagId>) -> DomainResult<bool>;
    async fn insert(&self, tag: NewTag) -> DomainResult<Tag>;
    async fn update(&self, update: TagUpdate) -> DomainResult<Option<Tag>>;
    /// Detaches the tag from every post before removing it.
    async fn delete(&self, id: TagId) -> DomainResult<bool>;
}
