// src/infrastructure/repositories/memory/authors.rs
use async_trait::async_trait;

use super::{InMemoryStore, StoreState, by_name, name_contains, slug_conflict};
use crate::domain::{
    author::{Author, AuthorItem, AuthorRepository, AuthorUpdate, NewAuthor},
    errors::{DomainError, DomainResult},
    pagination::{PageRequest, PagedList, paginate},
    value_objects::{AuthorId, Slug},
};

impl StoreState {
    fn author_items(&self, name: Option<&str>) -> Vec<AuthorItem> {
        let mut items: Vec<AuthorItem> = self
            .authors
            .values()
            .filter(|author| name_contains(&author.full_name, name))
            .map(|author| AuthorItem {
                author: author.clone(),
                post_count: self.published_posts_where(|post| post.author_id == author.id),
            })
            .collect();
        items.sort_by(|a, b| {
            by_name(&a.author.full_name, &b.author.full_name).then(a.author.id.cmp(&b.author.id))
        });
        items
    }
}

#[async_trait]
impl AuthorRepository for InMemoryStore {
    async fn find_by_id(&self, id: AuthorId) -> DomainResult<Option<Author>> {
        Ok(self.state.read().await.authors.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Author>> {
        let state = self.state.read().await;
        Ok(state
            .authors
            .values()
            .find(|author| author.slug == *slug)
            .cloned())
    }

    async fn list(&self) -> DomainResult<Vec<AuthorItem>> {
        Ok(self.state.read().await.author_items(None))
    }

    async fn page(
        &self,
        name: Option<&str>,
        request: PageRequest,
    ) -> DomainResult<PagedList<AuthorItem>> {
        let items = self.state.read().await.author_items(name);
        Ok(paginate(items, request))
    }

    async fn popular(&self, limit: u32) -> DomainResult<Vec<AuthorItem>> {
        let mut items = self.state.read().await.author_items(None);
        items.sort_by(|a, b| b.post_count.cmp(&a.post_count));
        items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(items)
    }

    async fn slug_exists(&self, slug: &Slug, exclude: Option<AuthorId>) -> DomainResult<bool> {
        let state = self.state.read().await;
        Ok(state
            .authors
            .values()
            .any(|author| author.slug == *slug && Some(author.id) != exclude))
    }

    async fn insert(&self, author: NewAuthor) -> DomainResult<Author> {
        let mut state = self.state.write().await;
        if state.authors.values().any(|a| a.slug == author.slug) {
            return Err(slug_conflict());
        }
        let id = AuthorId(state.next_id());
        let created = Author {
            id,
            full_name: author.full_name,
            email: author.email,
            slug: author.slug,
            joined_date: author.joined_date,
            image_url: None,
            notes: author.notes,
        };
        state.authors.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, update: AuthorUpdate) -> DomainResult<Option<Author>> {
        let mut state = self.state.write().await;
        if state
            .authors
            .values()
            .any(|a| a.slug == update.slug && a.id != update.id)
        {
            return Err(slug_conflict());
        }
        let Some(author) = state.authors.get_mut(&update.id) else {
            return Ok(None);
        };
        author.full_name = update.full_name;
        author.email = update.email;
        author.slug = update.slug;
        author.joined_date = update.joined_date;
        author.notes = update.notes;
        Ok(Some(author.clone()))
    }

    async fn delete(&self, id: AuthorId) -> DomainResult<bool> {
        let mut state = self.state.write().await;
        if state.posts.values().any(|post| post.author_id == id) {
            return Err(DomainError::Conflict("author still owns posts".into()));
        }
        Ok(state.authors.remove(&id).is_some())
    }

    async fn set_image_url(&self, id: AuthorId, image_url: Option<String>) -> DomainResult<bool> {
        let mut state = self.state.write().await;
        let Some(author) = state.authors.get_mut(&id) else {
            return Ok(false);
        };
        author.image_url = image_url;
        Ok(true)
    }
}
