// src/infrastructure/repositories/memory/posts.rs
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use rand::seq::SliceRandom;

use super::{InMemoryStore, PostRecord, slug_conflict};
use crate::domain::{
    errors::DomainResult,
    pagination::{PageRequest, PagedList, paginate},
    post::{
        MonthlyPostCount, NewPost, Post, PostOrdering, PostQuery, PostReadRepository,
        PostUpdate, PostWriteRepository, PublishState,
    },
    value_objects::{PostId, Slug},
};

#[async_trait]
impl PostReadRepository for InMemoryStore {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        let state = self.state.read().await;
        state.posts.get(&id).map(|record| state.hydrate(record)).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Post>> {
        let state = self.state.read().await;
        state
            .posts
            .values()
            .find(|record| record.slug == *slug)
            .map(|record| state.hydrate(record))
            .transpose()
    }

    async fn find_by_posted_slug(
        &self,
        year: i32,
        month: u32,
        slug: &Slug,
    ) -> DomainResult<Option<Post>> {
        let state = self.state.read().await;
        state
            .posts
            .values()
            .find(|record| {
                record.slug == *slug
                    && record.posted_date.year() == year
                    && record.posted_date.month() == month
            })
            .map(|record| state.hydrate(record))
            .transpose()
    }

    async fn find_one(&self, query: &PostQuery) -> DomainResult<Option<Post>> {
        let mut posts = self.list(query, PostOrdering::default()).await?;
        Ok((!posts.is_empty()).then(|| posts.swap_remove(0)))
    }

    async fn list(&self, query: &PostQuery, ordering: PostOrdering) -> DomainResult<Vec<Post>> {
        let mut posts = self.state.read().await.posts_matching(query)?;
        ordering.sort(&mut posts);
        Ok(posts)
    }

    async fn count(&self, query: &PostQuery) -> DomainResult<u64> {
        let matched = self.state.read().await.posts_matching(query)?.len();
        Ok(u64::try_from(matched).unwrap_or(u64::MAX))
    }

    async fn page(
        &self,
        query: &PostQuery,
        request: PageRequest,
        ordering: PostOrdering,
    ) -> DomainResult<PagedList<Post>> {
        let posts = self.list(query, ordering).await?;
        Ok(paginate(posts, request))
    }

    async fn slug_exists(&self, slug: &Slug, exclude: Option<PostId>) -> DomainResult<bool> {
        let state = self.state.read().await;
        Ok(state
            .posts
            .values()
            .any(|record| record.slug == *slug && Some(record.id) != exclude))
    }

    async fn popular(&self, limit: u32) -> DomainResult<Vec<Post>> {
        let mut posts = self
            .list(&PostQuery::new().published_only(), PostOrdering::most_viewed())
            .await?;
        posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(posts)
    }

    async fn random(&self, limit: u32) -> DomainResult<Vec<Post>> {
        let mut posts = self
            .state
            .read()
            .await
            .posts_matching(&PostQuery::new().published_only())?;
        posts.shuffle(&mut rand::thread_rng());
        posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(posts)
    }

    async fn archives(&self, months: u32) -> DomainResult<Vec<MonthlyPostCount>> {
        let state = self.state.read().await;
        let mut buckets: BTreeMap<(i32, u32), i64> = BTreeMap::new();
        for record in state.posts.values().filter(|record| record.published) {
            let key = (record.posted_date.year(), record.posted_date.month());
            *buckets.entry(key).or_default() += 1;
        }
        Ok(buckets
            .into_iter()
            .rev()
            .take(usize::try_from(months).unwrap_or(usize::MAX))
            .map(|((year, month), post_count)| MonthlyPostCount {
                year,
                month,
                post_count,
            })
            .collect())
    }
}

#[async_trait]
impl PostWriteRepository for InMemoryStore {
    async fn insert(&self, post: NewPost) -> DomainResult<Post> {
        let mut state = self.state.write().await;
        if state.posts.values().any(|record| record.slug == post.slug) {
            return Err(slug_conflict());
        }
        state.ensure_references(post.author_id, post.category_id)?;

        let tag_ids = state.resolve_tags(post.tags);
        let id = PostId(state.next_id());
        let record = PostRecord {
            id,
            title: post.title,
            short_description: post.short_description,
            description: post.description,
            slug: post.slug,
            meta: post.meta,
            image_url: post.image_url,
            view_count: 0,
            published: post.published,
            posted_date: post.posted_date,
            modified_date: None,
            author_id: post.author_id,
            category_id: post.category_id,
            tag_ids,
        };
        let created = state.hydrate(&record)?;
        state.posts.insert(id, record);
        Ok(created)
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<Option<Post>> {
        let mut state = self.state.write().await;
        if !state.posts.contains_key(&update.id) {
            return Ok(None);
        }
        if state
            .posts
            .values()
            .any(|record| record.slug == update.slug && record.id != update.id)
        {
            return Err(slug_conflict());
        }
        state.ensure_references(update.author_id, update.category_id)?;

        let tag_ids = state.resolve_tags(update.tags);
        let Some(record) = state.posts.get_mut(&update.id) else {
            return Ok(None);
        };
        record.title = update.title;
        record.short_description = update.short_description;
        record.description = update.description;
        record.slug = update.slug;
        record.meta = update.meta;
        record.published = update.published;
        record.author_id = update.author_id;
        record.category_id = update.category_id;
        record.tag_ids = tag_ids;
        record.modified_date = Some(update.modified_date);

        let record = record.clone();
        state.hydrate(&record).map(Some)
    }

    async fn delete(&self, id: PostId) -> DomainResult<bool> {
        Ok(self.state.write().await.posts.remove(&id).is_some())
    }

    async fn toggle_published(
        &self,
        id: PostId,
        modified_at: DateTime<Utc>,
    ) -> DomainResult<Option<bool>> {
        let mut state = self.state.write().await;
        Ok(state.posts.get_mut(&id).map(|record| {
            let next = PublishState::from_flag(record.published).toggled();
            record.published = next.is_published();
            record.modified_date = Some(modified_at);
            record.published
        }))
    }

    async fn increment_view_count(&self, id: PostId) -> DomainResult<bool> {
        let mut state = self.state.write().await;
        let Some(record) = state.posts.get_mut(&id) else {
            return Ok(false);
        };
        record.view_count += 1;
        Ok(true)
    }

    async fn set_image_url(&self, id: PostId, image_url: Option<String>) -> DomainResult<bool> {
        let mut state = self.state.write().await;
        let Some(record) = state.posts.get_mut(&id) else {
            return Ok(false);
        };
        record.image_url = image_url;
        Ok(true)
    }
}
