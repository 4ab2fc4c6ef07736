// src/application/queries/categories.rs
use std::sync::Arc;

use crate::{
    application::{
        cache::{CacheAside, CacheKey},
        dto::CategoryDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        category::{Category, CategoryRepository},
        pagination::{PageRequest, PagedList},
        value_objects::{CategoryId, Slug},
    },
};

pub struct CategoryQueryService {
    repo: Arc<dyn CategoryRepository>,
    cache: CacheAside,
}

impl CategoryQueryService {
    #[must_use]
    pub const fn new(repo: Arc<dyn CategoryRepository>, cache: CacheAside) -> Self {
        Self { repo, cache }
    }

    pub async fn get_category_by_id(&self, id: i64) -> ApplicationResult<CategoryDto> {
        let id = CategoryId::new(id)?;
        let key = CacheKey::by_id(CacheKey::CATEGORY, id);
        let category: Option<Category> = self
            .cache
            .get_or_load(&key, || async {
                self.repo.find_by_id(id).await.map_err(ApplicationError::from)
            })
            .await?;
        category
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("category {id} not found")))
    }

    pub async fn get_category_by_slug(&self, slug: &str) -> ApplicationResult<CategoryDto> {
        let slug = Slug::new(slug)?;
        let key = CacheKey::by_slug(CacheKey::CATEGORY, &slug);
        let category: Option<Category> = self
            .cache
            .get_or_load(&key, || async {
                self.repo.find_by_slug(&slug).await.map_err(ApplicationError::from)
            })
            .await?;
        category
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("category '{slug}' not found")))
    }

    /// All categories by name, each with its published post count.
    pub async fn list_categories(
        &self,
        show_on_menu_only: bool,
    ) -> ApplicationResult<Vec<CategoryDto>> {
        let items = self.repo.list(show_on_menu_only).await?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    pub async fn page_categories(
        &self,
        name: Option<&str>,
        request: PageRequest,
    ) -> ApplicationResult<PagedList<CategoryDto>> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        Ok(self.repo.page(name, request).await?.map(Into::into))
    }

    pub async fn category_slug_available(
        &self,
        slug: &str,
        exclude: Option<i64>,
    ) -> ApplicationResult<bool> {
        let slug = Slug::new(slug)?;
        let exclude = exclude.map(CategoryId::new).transpose()?;
        Ok(!self.repo.slug_exists(&slug, exclude).await?)
    }
}
