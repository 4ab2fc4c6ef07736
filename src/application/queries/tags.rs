// src/application/queries/tags.rs
use std::sync::Arc;

use crate::{
    application::{
        cache::{CacheAside, CacheKey},
        dto::TagDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        pagination::{PageRequest, PagedList},
        tag::{Tag, TagRepository},
        value_objects::{Slug, TagId},
    },
};

pub struct TagQueryService {
    repo: Arc<dyn TagRepository>,
    cache: CacheAside,
}

impl TagQueryService {
    #[must_use]
    pub const fn new(repo: Arc<dyn TagRepository>, cache: CacheAside) -> Self {
        Self { repo, cache }
    }

    pub async fn get_tag_by_id(&self, id: i64) -> ApplicationResult<TagDto> {
        let id = TagId::new(id)?;
        let key = CacheKey::by_id(CacheKey::TAG, id);
        let tag: Option<Tag> = self
            .cache
            .get_or_load(&key, || async {
                self.repo.find_by_id(id).await.map_err(ApplicationError::from)
            })
            .await?;
        tag.map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("tag {id} not found")))
    }

    pub async fn get_tag_by_slug(&self, slug: &str) -> ApplicationResult<TagDto> {
        let slug = Slug::new(slug)?;
        let key = CacheKey::by_slug(CacheKey::TAG, &slug);
        let tag: Option<Tag> = self
            .cache
            .get_or_load(&key, || async {
                self.repo.find_by_slug(&slug).await.map_err(ApplicationError::from)
            })
            .await?;
        tag.map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("tag '{slug}' not found")))
    }

    pub async fn list_tags(&self) -> ApplicationResult<Vec<TagDto>> {
        let items = self.repo.list().await?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    pub async fn page_tags(
        &self,
        name: Option<&str>,
        request: PageRequest,
    ) -> ApplicationResult<PagedList<TagDto>> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        Ok(self.repo.page(name, request).await?.map(Into::into))
    }

    pub async fn tag_slug_available(
        &self,
        slug: &str,
        exclude: Option<i64>,
    ) -> ApplicationResult<bool> {
        let slug = Slug::new(slug)?;
        let exclude = exclude.map(TagId::new).transpose()?;
        Ok(!self.repo.slug_exists(&slug, exclude).await?)
    }
}
