// src/infrastructure/repositories/memory/mod.rs
//! Process-local storage backend.
//!
//! Every repository trait is implemented on [`InMemoryStore`], so one store
//! instance shared through `Arc` behaves like a single database. Post
//! filtering reuses [`PostQuery::matches`] and pagination reuses
//! [`paginate`](crate::domain::pagination::paginate), which keeps this backend
//! semantically aligned with the SQL one.

mod authors;
mod categories;
mod posts;
mod tags;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::{
    author::Author,
    category::Category,
    errors::{DomainError, DomainResult},
    post::{AuthorRef, CategoryRef, Post, PostQuery, TagLabel, TagRef},
    tag::Tag,
    value_objects::{AuthorId, CategoryId, PostId, Slug, TagId},
};

#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
struct PostRecord {
    id: PostId,
    title: String,
    short_description: String,
    description: String,
    slug: Slug,
    meta: String,
    image_url: Option<String>,
    view_count: i64,
    published: bool,
    posted_date: DateTime<Utc>,
    modified_date: Option<DateTime<Utc>>,
    author_id: AuthorId,
    category_id: Option<CategoryId>,
    tag_ids: Vec<TagId>,
}

#[derive(Default)]
struct StoreState {
    posts: BTreeMap<PostId, PostRecord>,
    categories: BTreeMap<CategoryId, Category>,
    tags: BTreeMap<TagId, Tag>,
    authors: BTreeMap<AuthorId, Author>,
    last_id: i64,
}

impl StoreState {
    /// Ids are drawn from one sequence; uniqueness per table is all callers need.
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn hydrate(&self, record: &PostRecord) -> DomainResult<Post> {
        let author = self.authors.get(&record.author_id).ok_or_else(|| {
            DomainError::persistence(format!(
                "post {} references missing author {}",
                record.id, record.author_id
            ))
        })?;
        let category = record
            .category_id
            .and_then(|id| self.categories.get(&id))
            .map(|category| CategoryRef {
                id: category.id,
                name: category.name.clone(),
                slug: category.slug.clone(),
            });
        let tags = record
            .tag_ids
            .iter()
            .filter_map(|id| self.tags.get(id))
            .map(|tag| TagRef {
                id: tag.id,
                name: tag.name.clone(),
                slug: tag.slug.clone(),
            })
            .collect();

        Ok(Post {
            id: record.id,
            title: record.title.clone(),
            short_description: record.short_description.clone(),
            description: record.description.clone(),
            slug: record.slug.clone(),
            meta: record.meta.clone(),
            image_url: record.image_url.clone(),
            view_count: record.view_count,
            published: record.published,
            posted_date: record.posted_date,
            modified_date: record.modified_date,
            author: AuthorRef {
                id: author.id,
                full_name: author.full_name.clone(),
                slug: author.slug.clone(),
            },
            category,
            tags,
        })
    }

    fn posts_matching(&self, query: &PostQuery) -> DomainResult<Vec<Post>> {
        let mut matched = Vec::new();
        for record in self.posts.values() {
            let post = self.hydrate(record)?;
            if query.matches(&post) {
                matched.push(post);
            }
        }
        Ok(matched)
    }

    fn published_posts_where(&self, predicate: impl Fn(&PostRecord) -> bool) -> i64 {
        let count = self
            .posts
            .values()
            .filter(|record| record.published && predicate(record))
            .count();
        i64::try_from(count).unwrap_or(i64::MAX)
    }

    fn ensure_references(
        &self,
        author_id: AuthorId,
        category_id: Option<CategoryId>,
    ) -> DomainResult<()> {
        if !self.authors.contains_key(&author_id) {
            return Err(DomainError::NotFound("author not found".into()));
        }
        if let Some(category_id) = category_id {
            if !self.categories.contains_key(&category_id) {
                return Err(DomainError::NotFound("category not found".into()));
            }
        }
        Ok(())
    }

    /// Attaches existing tags by slug and creates the missing ones.
    fn resolve_tags(&mut self, labels: Vec<TagLabel>) -> Vec<TagId> {
        let mut ids = Vec::with_capacity(labels.len());
        for label in labels {
            let existing = self
                .tags
                .values()
                .find(|tag| tag.slug == label.slug)
                .map(|tag| tag.id);
            let id = match existing {
                Some(id) => id,
                None => {
                    let id = TagId(self.next_id());
                    self.tags.insert(
                        id,
                        Tag {
                            id,
                            name: label.name,
                            slug: label.slug,
                            description: String::new(),
                        },
                    );
                    id
                }
            };
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }
}

fn slug_conflict() -> DomainError {
    DomainError::Conflict("slug already exists".into())
}

/// Case-insensitive substring match used by the name filters.
fn name_contains(name: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|needle| name.to_lowercase().contains(&needle.to_lowercase()))
}

fn by_name(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
