// src/presentation/http/params.rs
use crate::domain::pagination::{DEFAULT_PAGE_SIZE, PageRequest, SortDirection};
use crate::domain::post::{PostOrdering, PostQuery, PostSortKey};
use crate::presentation::http::error::{HttpError, HttpResult};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

fn default_page_number() -> i64 {
    1
}

fn default_page_size() -> i64 {
    i64::from(DEFAULT_PAGE_SIZE)
}

/// Query string of post listings: every condition field plus paging and sort.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PostFilterParams {
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
    /// Matched against title, descriptions, category name and tag names.
    pub keyword: Option<String>,
    #[serde(default)]
    pub published_only: bool,
    #[serde(default)]
    pub not_published: bool,
    /// Values below 1 are treated as 1.
    pub page_number: Option<i64>,
    /// Clamped to 1..=100.
    pub page_size: Option<i64>,
    /// `posted_date` (default), `modified_date`, `title`, `view_count` or `id`.
    pub sort_column: Option<String>,
    /// `asc` or `desc` (default).
    pub sort_order: Option<String>,
}

impl PostFilterParams {
    #[must_use]
    pub fn query(&self) -> PostQuery {
        PostQuery {
            author_id: self.author_id,
            author_slug: self.author_slug.clone(),
            category_id: self.category_id,
            category_slug: self.category_slug.clone(),
            tag_id: self.tag_id,
            tag_slug: self.tag_slug.clone(),
            year: self.year,
            month: self.month,
            day: self.day,
            post_id: self.post_id,
            post_slug: self.post_slug.clone(),
            keyword: self.keyword.clone(),
            published_only: self.published_only,
            not_published: self.not_published,
        }
    }

    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page_number.unwrap_or_else(default_page_number),
            self.page_size.unwrap_or_else(default_page_size),
        )
    }

    pub fn ordering(&self) -> HttpResult<PostOrdering> {
        let key = match non_blank(&self.sort_column) {
            Some(column) => PostSortKey::parse(column).ok_or_else(|| {
                HttpError::bad_request(format!("unknown sort column '{column}'"))
            })?,
            None => PostSortKey::default(),
        };
        let direction = match non_blank(&self.sort_order) {
            Some(order) => SortDirection::parse(order)
                .ok_or_else(|| HttpError::bad_request(format!("unknown sort order '{order}'")))?,
            None => SortDirection::default(),
        };
        Ok(PostOrdering::new(key, direction))
    }

    pub fn into_parts(self) -> HttpResult<(PostQuery, PageRequest, PostOrdering)> {
        let ordering = self.ordering()?;
        Ok((self.query(), self.page_request(), ordering))
    }
}

/// Paging for category, tag and author listings.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PagingParams {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
}

impl PagingParams {
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page_number.unwrap_or_else(default_page_number),
            self.page_size.unwrap_or_else(default_page_size),
        )
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        non_blank(&self.name)
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SlugAvailabilityParams {
    pub slug: String,
    /// Id of the entity being edited, which may keep its own slug.
    pub exclude_id: Option<i64>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_newest_first() {
        let (query, page, ordering) = PostFilterParams::default().into_parts().unwrap();
        assert!(query.is_unconstrained());
        assert_eq!(page.page_number(), 1);
        assert_eq!(page.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(ordering, PostOrdering::default());
    }

    #[test]
    fn parses_sort_fields() {
        let params = PostFilterParams {
            sort_column: Some("view_count".into()),
            sort_order: Some("ASC".into()),
            ..Default::default()
        };
        let ordering = params.ordering().unwrap();
        assert_eq!(ordering.key, PostSortKey::ViewCount);
        assert_eq!(ordering.direction, SortDirection::Asc);
    }

    #[test]
    fn rejects_unknown_sort_column() {
        let params = PostFilterParams {
            sort_column: Some("rank".into()),
            ..Default::default()
        };
        assert!(params.ordering().is_err());
    }

    #[test]
    fn entity_paging_is_normalized() {
        let params = PagingParams {
            page_number: Some(0),
            page_size: Some(500),
            name: Some("  ".into()),
        };
        let page = params.page_request();
        assert_eq!(page.page_number(), 1);
        assert_eq!(page.page_size(), 100);
        assert!(params.name().is_none());
    }
}
