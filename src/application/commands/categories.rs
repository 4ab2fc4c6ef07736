// src/application/commands/categories.rs
use std::sync::Arc;

use crate::{
    application::{
        cache::{CacheAside, CacheKey},
        commands::{embedding_post_keys, resolve_slug},
        dto::CategoryDto,
        error::{ApplicationError, ApplicationResult},
        ports::SlugGeneratorPort,
    },
    domain::{
        category::{
            Category, CategoryRepository, CategoryUpdate, NewCategory,
            entity::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN},
        },
        post::{PostQuery, PostReadRepository},
        value_objects::{CategoryId, Slug, optional_text, required_text},
    },
};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct CategoryCommand {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub show_on_menu: bool,
}

pub struct CategoryCommandService {
    repo: Arc<dyn CategoryRepository>,
    posts: Arc<dyn PostReadRepository>,
    slugger: Arc<SlugGeneratorPort>,
    cache: CacheAside,
}

impl CategoryCommandService {
    #[must_use]
    pub const fn new(
        repo: Arc<dyn CategoryRepository>,
        posts: Arc<dyn PostReadRepository>,
        slugger: Arc<SlugGeneratorPort>,
        cache: CacheAside,
    ) -> Self {
        Self {
            repo,
            posts,
            slugger,
            cache,
        }
    }

    pub async fn create_category(&self, command: CategoryCommand) -> ApplicationResult<CategoryDto> {
        let name = required_text("name", command.name, MAX_NAME_LEN)?;
        let description =
            optional_text("description", command.description, MAX_DESCRIPTION_LEN)?
                .unwrap_or_default();
        let slug = resolve_slug(self.slugger.as_ref(), command.slug, &name)?;
        self.ensure_slug_available(&slug, None).await?;

        let created = self
            .repo
            .insert(NewCategory {
                name,
                slug,
                description,
                show_on_menu: command.show_on_menu,
            })
            .await?;
        info!(category_id = %created.id, slug = %created.slug, "category created");
        Ok(created.into())
    }

    pub async fn update_category(
        &self,
        id: i64,
        command: CategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let id = CategoryId::new(id)?;
        let name = required_text("name", command.name, MAX_NAME_LEN)?;
        let description =
            optional_text("description", command.description, MAX_DESCRIPTION_LEN)?
                .unwrap_or_default();
        let current = self.load(id).await?;
        let slug = match command.slug.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Slug::new(value)?,
            _ => current.slug.clone(),
        };
        self.ensure_slug_available(&slug, Some(id)).await?;
        let post_keys = self.post_keys(id).await?;

        let updated = self
            .repo
            .update(CategoryUpdate {
                id,
                name,
                slug,
                description,
                show_on_menu: command.show_on_menu,
            })
            .await?
            .ok_or_else(|| not_found(id))?;
        self.invalidate(&current, Some(&updated.slug)).await;
        self.cache.invalidate(post_keys).await;
        info!(category_id = %id, "category updated");
        Ok(updated.into())
    }

    /// Posts filed under the category become uncategorized.
    pub async fn delete_category(&self, id: i64) -> ApplicationResult<()> {
        let id = CategoryId::new(id)?;
        let current = self.load(id).await?;
        let post_keys = self.post_keys(id).await?;
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        self.invalidate(&current, None).await;
        self.cache.invalidate(post_keys).await;
        info!(category_id = %id, "category deleted");
        Ok(())
    }

    pub async fn toggle_show_on_menu(&self, id: i64) -> ApplicationResult<CategoryDto> {
        let id = CategoryId::new(id)?;
        let current = self.load(id).await?;
        let show_on_menu = self
            .repo
            .toggle_show_on_menu(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        self.invalidate(&current, None).await;
        info!(category_id = %id, show_on_menu, "category menu flag toggled");
        Ok(Category {
            show_on_menu,
            ..current
        }
        .into())
    }

    async fn load(&self, id: CategoryId) -> ApplicationResult<Category> {
        self.repo.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    async fn post_keys(&self, id: CategoryId) -> ApplicationResult<Vec<String>> {
        let query = PostQuery::new().with_category_id(id.into());
        embedding_post_keys(self.posts.as_ref(), &query).await
    }

    async fn ensure_slug_available(
        &self,
        slug: &Slug,
        exclude: Option<CategoryId>,
    ) -> ApplicationResult<()> {
        if self.repo.slug_exists(slug, exclude).await? {
            return Err(ApplicationError::slug_taken(slug));
        }
        Ok(())
    }

    async fn invalidate(&self, category: &Category, new_slug: Option<&Slug>) {
        let mut keys = vec![
            CacheKey::by_id(CacheKey::CATEGORY, category.id),
            CacheKey::by_slug(CacheKey::CATEGORY, &category.slug),
        ];
        if let Some(slug) = new_slug.filter(|slug| **slug != category.slug) {
            keys.push(CacheKey::by_slug(CacheKey::CATEGORY, slug));
        }
        self.cache.invalidate(keys).await;
    }
}

fn not_found(id: CategoryId) -> ApplicationError {
    ApplicationError::not_found(format!("category {id} not found"))
}
