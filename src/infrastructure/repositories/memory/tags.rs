// src/infrastructure/repositories/memory/tags.rs
use async_trait::async_trait;

use super::{InMemoryStore, StoreState, by_name, name_contains, slug_conflict};
use crate::domain::{
    errors::DomainResult,
    pagination::{PageRequest, PagedList, paginate},
    tag::{NewTag, Tag, TagItem, TagRepository, TagUpdate},
    value_objects::{Slug, TagId},
};

impl StoreState {
    fn tag_items(&self, name: Option<&str>) -> Vec<TagItem> {
        let mut items: Vec<TagItem> = self
            .tags
            .values()
            .filter(|tag| name_contains(&tag.name, name))
            .map(|tag| TagItem {
                tag: tag.clone(),
                post_count: self.published_posts_where(|post| post.tag_ids.contains(&tag.id)),
            })
            .collect();
        items.sort_by(|a, b| by_name(&a.tag.name, &b.tag.name).then(a.tag.id.cmp(&b.tag.id)));
        items
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn find_by_id(&self, id: TagId) -> DomainResult<Option<Tag>> {
        Ok(self.state.read().await.tags.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Tag>> {
        let state = self.state.read().await;
        Ok(state.tags.values().find(|tag| tag.slug == *slug).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<TagItem>> {
        Ok(self.state.read().await.tag_items(None))
    }

    async fn page(
        &self,
        name: Option<&str>,
        request: PageRequest,
    ) -> DomainResult<PagedList<TagItem>> {
        let items = self.state.read().await.tag_items(name);
        Ok(paginate(items, request))
    }

    async fn slug_exists(&self, slug: &Slug, exclude: Option<TagId>) -> DomainResult<bool> {
        let state = self.state.read().await;
        Ok(state
            .tags
            .values()
            .any(|tag| tag.slug == *slug && Some(tag.id) != exclude))
    }

    async fn insert(&self, tag: NewTag) -> DomainResult<Tag> {
        let mut state = self.state.write().await;
        if state.tags.values().any(|t| t.slug == tag.slug) {
            return Err(slug_conflict());
        }
        let id = TagId(state.next_id());
        let created = Tag {
            id,
            name: tag.name,
            slug: tag.slug,
            description: tag.description,
        };
        state.tags.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, update: TagUpdate) -> DomainResult<Option<Tag>> {
        let mut state = self.state.write().await;
        if state
            .tags
            .values()
            .any(|t| t.slug == update.slug && t.id != update.id)
        {
            return Err(slug_conflict());
        }
        let Some(tag) = state.tags.get_mut(&update.id) else {
            return Ok(None);
        };
        tag.name = update.name;
        tag.slug = update.slug;
        tag.description = update.description;
        Ok(Some(tag.clone()))
    }

    async fn delete(&self, id: TagId) -> DomainResult<bool> {
        let mut state = self.state.write().await;
        if state.tags.remove(&id).is_none() {
            return Ok(false);
        }
        for post in state.posts.values_mut() {
            post.tag_ids.retain(|tag_id| *tag_id != id);
        }
        Ok(true)
    }
}
