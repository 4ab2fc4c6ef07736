// src/domain/post/query.rs
//! Post filter condition and the clauses composed from it.
//!
//! A [`PostQuery`] is a bag of optional constraints. [`PostQuery::filters`]
//! runs every clause builder in [`CLAUSE_BUILDERS`]; each builder checks its
//! own field and emits at most one [`PostFilter`]. The resulting clauses are
//! combined with AND by every backend, so an unset field never narrows the
//! result and clause order has no effect.

use crate::domain::post::entity::Post;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostQuery {
    pub author_id: Option<i64>,
    pub author_slug: Option<String>,
    pub category_id: Option<i64>,
    pub category_slug: Option<String>,
    pub tag_id: Option<i64>,
    pub tag_slug: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub post_id: Option<i64>,
    pub post_slug: Option<String>,
    pub keyword: Option<String>,
    #[serde(default)]
    pub published_only: bool,
    #[serde(default)]
    pub not_published: bool,
}

impl PostQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_author_id(mut self, id: i64) -> Self {
        self.author_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_author_slug(mut self, slug: impl Into<String>) -> Self {
        self.author_slug = Some(slug.into());
        self
    }

    #[must_use]
    pub const fn with_category_id(mut self, id: i64) -> Self {
        self.category_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_category_slug(mut self, slug: impl Into<String>) -> Self {
        self.category_slug = Some(slug.into());
        self
    }

    #[must_use]
    pub const fn with_tag_id(mut self, id: i64) -> Self {
        self.tag_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_tag_slug(mut self, slug: impl Into<String>) -> Self {
        self.tag_slug = Some(slug.into());
        self
    }

    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub const fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    #[must_use]
    pub const fn with_day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }

    #[must_use]
    pub const fn with_post_id(mut self, id: i64) -> Self {
        self.post_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_post_slug(mut self, slug: impl Into<String>) -> Self {
        self.post_slug = Some(slug.into());
        self
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    #[must_use]
    pub const fn published_only(mut self) -> Self {
        self.published_only = true;
        self
    }

    #[must_use]
    pub const fn not_published(mut self) -> Self {
        self.not_published = true;
        self
    }

    /// Active clauses for this condition, in builder order.
    #[must_use]
    pub fn filters(&self) -> Vec<PostFilter> {
        CLAUSE_BUILDERS
            .iter()
            .filter_map(|build| build(self))
            .collect()
    }

    /// True when no field narrows the result.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.filters().is_empty()
    }

    #[must_use]
    pub fn matches(&self, post: &Post) -> bool {
        self.filters().iter().all(|filter| filter.matches(post))
    }
}

/// A single constraint on a post. Strings are trimmed and non-empty; ids and
/// date parts are positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    AuthorId(i64),
    AuthorSlug(String),
    CategoryId(i64),
    CategorySlug(String),
    TagId(i64),
    TagSlug(String),
    PostedYear(i32),
    PostedMonth(u32),
    PostedDay(u32),
    PostId(i64),
    PostSlug(String),
    Published(bool),
    Keyword(String),
}

impl PostFilter {
    #[must_use]
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            Self::AuthorId(id) => post.author.id.0 == *id,
            Self::AuthorSlug(slug) => post.author.slug.as_str() == slug,
            Self::CategoryId(id) => post.category.as_ref().is_some_and(|c| c.id.0 == *id),
            Self::CategorySlug(slug) => post
                .category
                .as_ref()
                .is_some_and(|c| c.slug.as_str() == slug),
            Self::TagId(id) => post.has_tag(|t| t.id.0 == *id),
            Self::TagSlug(slug) => post.has_tag(|t| t.slug.as_str() == slug),
            Self::PostedYear(year) => post.posted_year() == *year,
            Self::PostedMonth(month) => post.posted_month() == *month,
            Self::PostedDay(day) => post.posted_day() == *day,
            Self::PostId(id) => post.id.0 == *id,
            Self::PostSlug(slug) => post.slug.as_str() == slug,
            Self::Published(flag) => post.published == *flag,
            Self::Keyword(keyword) => keyword_matches(post, keyword),
        }
    }
}

fn keyword_matches(post: &Post, keyword: &str) -> bool {
    let needle = keyword.to_lowercase();
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

    contains(&post.title)
        || contains(&post.short_description)
        || contains(&post.description)
        || post.category.as_ref().is_some_and(|c| contains(&c.name))
        || post.has_tag(|t| contains(&t.name))
}

type ClauseBuilder = fn(&PostQuery) -> Option<PostFilter>;

pub const CLAUSE_BUILDERS: [ClauseBuilder; 14] = [
    |q| positive(q.author_id).map(PostFilter::AuthorId),
    |q| non_blank(&q.author_slug).map(PostFilter::AuthorSlug),
    |q| positive(q.category_id).map(PostFilter::CategoryId),
    |q| non_blank(&q.category_slug).map(PostFilter::CategorySlug),
    |q| positive(q.tag_id).map(PostFilter::TagId),
    |q| non_blank(&q.tag_slug).map(PostFilter::TagSlug),
    |q| positive(q.year).map(PostFilter::PostedYear),
    |q| positive(q.month).map(PostFilter::PostedMonth),
    |q| positive(q.day).map(PostFilter::PostedDay),
    |q| positive(q.post_id).map(PostFilter::PostId),
    |q| non_blank(&q.post_slug).map(PostFilter::PostSlug),
    |q| q.published_only.then_some(PostFilter::Published(true)),
    |q| q.not_published.then_some(PostFilter::Published(false)),
    |q| non_blank(&q.keyword).map(PostFilter::Keyword),
];

fn positive<T: PartialOrd + Default>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v > T::default())
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::entity::{AuthorRef, CategoryRef, TagRef};
    use crate::domain::value_objects::{AuthorId, CategoryId, PostId, Slug, TagId};
    use chrono::{TimeZone, Utc};

    fn post(id: i64, published: bool) -> Post {
        Post {
            id: PostId::new(id).unwrap(),
            title: format!("Post {id}"),
            short_description: "short".into(),
            description: "body".into(),
            slug: Slug::new(format!("post-{id}")).unwrap(),
            meta: String::new(),
            image_url: None,
            view_count: 0,
            published,
            posted_date: Utc.with_ymd_and_hms(2023, 3, 15, 12, 0, 0).unwrap(),
            modified_date: None,
            author: AuthorRef {
                id: AuthorId::new(1).unwrap(),
                full_name: "Ada".into(),
                slug: Slug::new("ada").unwrap(),
            },
            category: Some(CategoryRef {
                id: CategoryId::new(2).unwrap(),
                name: "Systems".into(),
                slug: Slug::new("systems").unwrap(),
            }),
            tags: vec![TagRef {
                id: TagId::new(3).unwrap(),
                name: "Borrow Checker".into(),
                slug: Slug::new("borrow-checker").unwrap(),
            }],
        }
    }

    #[test]
    fn unset_condition_has_no_clauses() {
        let query = PostQuery::new();
        assert!(query.filters().is_empty());
        assert!(query.is_unconstrained());
        assert!(query.matches(&post(1, false)));
    }

    #[test]
    fn zero_and_blank_values_are_unset() {
        let query = PostQuery::new()
            .with_author_id(0)
            .with_category_id(-1)
            .with_tag_slug("   ")
            .with_year(0)
            .with_month(0)
            .with_keyword("");
        assert!(query.filters().is_empty());
    }

    #[test]
    fn each_field_emits_its_own_clause() {
        let query = PostQuery::new()
            .with_author_slug(" ada ")
            .with_year(2023)
            .with_month(3)
            .with_day(15)
            .published_only();
        assert_eq!(
            query.filters(),
            vec![
                PostFilter::AuthorSlug("ada".into()),
                PostFilter::PostedYear(2023),
                PostFilter::PostedMonth(3),
                PostFilter::PostedDay(15),
                PostFilter::Published(true),
            ]
        );
        assert!(query.matches(&post(1, true)));
        assert!(!query.matches(&post(1, false)));
    }

    #[test]
    fn contradictory_publish_flags_match_nothing() {
        let query = PostQuery::new().published_only().not_published();
        assert!(!query.matches(&post(1, true)));
        assert!(!query.matches(&post(2, false)));
    }

    #[test]
    fn keyword_is_case_insensitive_across_fields() {
        let p = post(1, true);
        assert!(PostQuery::new().with_keyword("BORROW").matches(&p));
        assert!(PostQuery::new().with_keyword("system").matches(&p));
        assert!(PostQuery::new().with_keyword("post 1").matches(&p));
        assert!(!PostQuery::new().with_keyword("garbage collector").matches(&p));
    }

    #[test]
    fn category_clauses_reject_uncategorized_posts() {
        let mut p = post(1, true);
        p.category = None;
        assert!(!PostQuery::new().with_category_id(2).matches(&p));
        assert!(!PostQuery::new().with_category_slug("systems").matches(&p));
    }

    #[test]
    fn clause_order_does_not_change_the_result() {
        let p = post(5, true);
        let query = PostQuery::new()
            .with_tag_id(3)
            .with_post_id(5)
            .with_category_slug("systems")
            .with_keyword("body");
        let forward = query.filters().iter().all(|f| f.matches(&p));
        let backward = query.filters().iter().rev().all(|f| f.matches(&p));
        assert!(forward);
        assert_eq!(forward, backward);
        assert_eq!(query.filters(), query.clone().filters());
    }
}
