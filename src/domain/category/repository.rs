use crate::domain::category::entity::{Category, CategoryItem, CategoryUpdate, NewCategory};
use crate::domain::errors::DomainResult;
use crate::domain::pagination::{PageRequest, PagedList};
use crate::domain::value_objects::{CategoryId, Slug};
use async_trait::async_trait;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Category>>;
    /// Ordered by name.
    async fn list(&self, show_on_menu_only: bool) -> DomainResult<Vec<CategoryItem>>;
    async fn page(
        &self,
        name: Option<&str>,
        request: PageRequest,
    ) -> DomainResult<PagedList<CategoryItem>>;
    async fn slug_exists(&self, slug: &Slug, exclude: Option<CategoryId>) -> DomainResult<bool>;
    async fn insert(&self, category: NewCategory) -> DomainResult<Category>;
    async fn update(&self, update: CategoryUpdate) -> DomainResult<Option<Category>>;
    /// Posts filed under the category become uncategorized.
    async fn delete(&self, id: CategoryId) -> DomainResult<bool>;
    async fn toggle_show_on_menu(&self, id: CategoryId) -> DomainResult<Option<bool>>;
}
