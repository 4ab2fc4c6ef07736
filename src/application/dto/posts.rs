use crate::domain::post::{AuthorRef, CategoryRef, MonthlyPostCount, Post, TagRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Compact reference to a related author, category or tag.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntityRefDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<AuthorRef> for EntityRefDto {
    fn from(value: AuthorRef) -> Self {
        Self {
            id: value.id.into(),
            name: value.full_name,
            slug: value.slug.into_inner(),
        }
    }
}

impl From<CategoryRef> for EntityRefDto {
    fn from(value: CategoryRef) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
            slug: value.slug.into_inner(),
        }
    }
}

impl From<TagRef> for EntityRefDto {
    fn from(value: TagRef) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
            slug: value.slug.into_inner(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostDto {
    pub id: i64,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub slug: String,
    pub meta: String,
    pub image_url: Option<String>,
    pub view_count: i64,
    pub published: bool,
    pub posted_date: DateTime<Utc>,
    pub modified_date: Option<DateTime<Utc>>,
    pub author: EntityRefDto,
    pub category: Option<EntityRefDto>,
    pub tags: Vec<EntityRefDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.into(),
            title: post.title,
            short_description: post.short_description,
            description: post.description,
            slug: post.slug.into_inner(),
            meta: post.meta,
            image_url: post.image_url,
            view_count: post.view_count,
            published: post.published,
            posted_date: post.posted_date,
            modified_date: post.modified_date,
            author: post.author.into(),
            category: post.category.map(Into::into),
            tags: post.tags.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublishStateDto {
    pub id: i64,
    pub published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArchiveEntryDto {
    pub year: i32,
    pub month: u32,
    pub post_count: i64,
}

impl From<MonthlyPostCount> for ArchiveEntryDto {
    fn from(value: MonthlyPostCount) -> Self {
        Self {
            year: value.year,
            month: value.month,
            post_count: value.post_count,
        }
    }
}
