// src/domain/post/entity.rs
use crate::domain::value_objects::{AuthorId, CategoryId, PostId, Slug, TagId};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_SHORT_DESCRIPTION_LEN: usize = 500;
pub const MAX_META_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: AuthorId,
    pub full_name: String,
    pub slug: Slug,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
    pub slug: Slug,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    pub id: TagId,
    pub name: String,
    pub slug: Slug,
}

/// Tag as supplied on post writes; storage attaches the existing tag with
/// this slug or creates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLabel {
    pub name: String,
    pub slug: Slug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishState {
    Draft,
    Published,
}

impl PublishState {
    #[must_use]
    pub const fn from_flag(published: bool) -> Self {
        if published {
            Self::Published
        } else {
            Self::Draft
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Draft => Self::Published,
            Self::Published => Self::Draft,
        }
    }

    #[must_use]
    pub const fn is_published(self) -> bool {
        matches!(self, Self::Published)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub slug: Slug,
    pub meta: String,
    pub image_url: Option<String>,
    pub view_count: i64,
    pub published: bool,
    pub posted_date: DateTime<Utc>,
    pub modified_date: Option<DateTime<Utc>>,
    pub author: AuthorRef,
    pub category: Option<CategoryRef>,
    pub tags: Vec<TagRef>,
}

impl Post {
    #[must_use]
    pub fn publish_state(&self) -> PublishState {
        PublishState::from_flag(self.published)
    }

    pub fn toggle_published(&mut self, now: DateTime<Utc>) -> PublishState {
        let next = self.publish_state().toggled();
        self.published = next.is_published();
        self.modified_date = Some(now);
        next
    }

    #[must_use]
    pub fn posted_year(&self) -> i32 {
        self.posted_date.year()
    }

    #[must_use]
    pub fn posted_month(&self) -> u32 {
        self.posted_date.month()
    }

    #[must_use]
    pub fn posted_day(&self) -> u32 {
        self.posted_date.day()
    }

    #[must_use]
    pub fn has_tag(&self, predicate: impl Fn(&TagRef) -> bool) -> bool {
        self.tags.iter().any(predicate)
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub slug: Slug,
    pub meta: String,
    pub image_url: Option<String>,
    pub published: bool,
    pub posted_date: DateTime<Utc>,
    pub author_id: AuthorId,
    pub category_id: Option<CategoryId>,
    pub tags: Vec<TagLabel>,
}

/// Full replacement of a post's editable fields. View count and posted date
/// are not editable.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub id: PostId,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub slug: Slug,
    pub meta: String,
    pub published: bool,
    pub author_id: AuthorId,
    pub category_id: Option<CategoryId>,
    pub tags: Vec<TagLabel>,
    pub modified_date: DateTime<Utc>,
}

/// Published post count for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPostCount {
    pub year: i32,
    pub month: u32,
    pub post_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_post() -> Post {
        Post {
            id: PostId::new(1).unwrap(),
            title: "title".into(),
            short_description: "short".into(),
            description: "body".into(),
            slug: Slug::new("title").unwrap(),
            meta: String::new(),
            image_url: None,
            view_count: 0,
            published: false,
            posted_date: Utc.with_ymd_and_hms(2023, 4, 9, 8, 0, 0).unwrap(),
            modified_date: None,
            author: AuthorRef {
                id: AuthorId::new(1).unwrap(),
                full_name: "Ada".into(),
                slug: Slug::new("ada").unwrap(),
            },
            category: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn toggle_twice_restores_original_state() {
        let mut post = sample_post();
        let now = Utc::now();
        assert_eq!(post.toggle_published(now), PublishState::Published);
        assert!(post.published);
        assert_eq!(post.modified_date, Some(now));
        assert_eq!(post.toggle_published(now), PublishState::Draft);
        assert!(!post.published);
    }

    #[test]
    fn posted_date_parts() {
        let post = sample_post();
        assert_eq!(
            (post.posted_year(), post.posted_month(), post.posted_day()),
            (2023, 4, 9)
        );
    }
}
