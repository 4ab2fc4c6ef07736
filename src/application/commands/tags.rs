// src/application/commands/tags.rs
use std::sync::Arc;

use crate::{
    application::{
        cache::{CacheAside, CacheKey},
        commands::{embedding_post_keys, resolve_slug},
        dto::TagDto,
        error::{ApplicationError, ApplicationResult},
        ports::SlugGeneratorPort,
    },
    domain::{
        post::{PostQuery, PostReadRepository},
        tag::{
            NewTag, Tag, TagRepository, TagUpdate,
            entity::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN},
        },
        value_objects::{Slug, TagId, optional_text, required_text},
    },
};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct TagCommand {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
}

pub struct TagCommandService {
    repo: Arc<dyn TagRepository>,
    posts: Arc<dyn PostReadRepository>,
    slugger: Arc<SlugGeneratorPort>,
    cache: CacheAside,
}

impl TagCommandService {
    #[must_use]
    pub const fn new(
        repo: Arc<dyn TagRepository>,
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

    pub async fn create_tag(&self, command: TagCommand) -> ApplicationResult<TagDto> {
        let name = required_text("name", command.name, MAX_NAME_LEN)?;
        let description = optional_text("description", command.description, MAX_DESCRIPTION_LEN)?
            .unwrap_or_default();
        let slug = resolve_slug(self.slugger.as_ref(), command.slug, &name)?;
        if self.repo.slug_exists(&slug, None).await? {
            return Err(ApplicationError::slug_taken(&slug));
        }

        let created = self
            .repo
            .insert(NewTag {
                name,
                slug,
                description,
            })
            .await?;
        info!(tag_id = %created.id, slug = %created.slug, "tag created");
        Ok(created.into())
    }

    pub async fn update_tag(&self, id: i64, command: TagCommand) -> ApplicationResult<TagDto> {
        let id = TagId::new(id)?;
        let name = required_text("name", command.name, MAX_NAME_LEN)?;
        let description = optional_text("description", command.description, MAX_DESCRIPTION_LEN)?
            .unwrap_or_default();
        let current = self.load(id).await?;
        let slug = match command.slug.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Slug::new(value)?,
            _ => current.slug.clone(),
        };
        if self.repo.slug_exists(&slug, Some(id)).await? {
            return Err(ApplicationError::slug_taken(&slug));
        }
        let post_keys = self.post_keys(id).await?;

        let updated = self
            .repo
            .update(TagUpdate {
                id,
                name,
                slug,
                description,
            })
            .await?
            .ok_or_else(|| not_found(id))?;
        self.invalidate(&current, &updated.slug).await;
        self.cache.invalidate(post_keys).await;
        info!(tag_id = %id, "tag updated");
        Ok(updated.into())
    }

    /// Detaches the tag from its posts, then removes it.
    pub async fn delete_tag(&self, id: i64) -> ApplicationResult<()> {
        let id = TagId::new(id)?;
        let current = self.load(id).await?;
        let post_keys = self.post_keys(id).await?;
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        self.invalidate(&current, &current.slug).await;
        self.cache.invalidate(post_keys).await;
        info!(tag_id = %id, "tag deleted");
        Ok(())
    }

    async fn load(&self, id: TagId) -> ApplicationResult<Tag> {
        self.repo.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    async fn post_keys(&self, id: TagId) -> ApplicationResult<Vec<String>> {
        embedding_post_keys(self.posts.as_ref(), &PostQuery::new().with_tag_id(id.into())).await
    }

    async fn invalidate(&self, tag: &Tag, new_slug: &Slug) {
        self.cache
            .invalidate([
                CacheKey::by_id(CacheKey::TAG, tag.id),
                CacheKey::by_slug(CacheKey::TAG, &tag.slug),
                CacheKey::by_slug(CacheKey::TAG, new_slug),
            ])
            .await;
    }
}

fn not_found(id: TagId) -> ApplicationError {
    ApplicationError::not_found(format!("tag {id} not found"))
}
