// src/domain/post/ordering.rs
use crate::domain::pagination::SortDirection;
use crate::domain::post::entity::Post;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSortKey {
    #[default]
    PostedDate,
    ModifiedDate,
    Title,
    ViewCount,
    Id,
}

impl PostSortKey {
    /// Accepts `posted_date`, `postedDate` or `PostedDate` style names.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "posteddate" | "posted" | "date" => Some(Self::PostedDate),
            "modifieddate" | "modified" => Some(Self::ModifiedDate),
            "title" => Some(Self::Title),
            "viewcount" | "views" => Some(Self::ViewCount),
            "id" => Some(Self::Id),
            _ => None,
        }
    }

    /// SQL expression over the `p` alias of the posts table.
    #[must_use]
    pub const fn sql_expr(self) -> &'static str {
        match self {
            Self::PostedDate => "p.posted_date",
            Self::ModifiedDate => "COALESCE(p.modified_date, p.posted_date)",
            Self::Title => "LOWER(p.title)",
            Self::ViewCount => "p.view_count",
            Self::Id => "p.id",
        }
    }
}

/// Sort order for post listings. Ties are broken by id in the same direction
/// so consecutive pages never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostOrdering {
    pub key: PostSortKey,
    pub direction: SortDirection,
}

impl PostOrdering {
    #[must_use]
    pub const fn new(key: PostSortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    #[must_use]
    pub const fn most_viewed() -> Self {
        Self::new(PostSortKey::ViewCount, SortDirection::Desc)
    }

    #[must_use]
    pub fn compare(self, a: &Post, b: &Post) -> Ordering {
        let primary = match self.key {
            PostSortKey::PostedDate => a.posted_date.cmp(&b.posted_date),
            PostSortKey::ModifiedDate => a
                .modified_date
                .unwrap_or(a.posted_date)
                .cmp(&b.modified_date.unwrap_or(b.posted_date)),
            PostSortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            PostSortKey::ViewCount => a.view_count.cmp(&b.view_count),
            PostSortKey::Id => Ordering::Equal,
        };
        self.direction.apply(primary.then_with(|| a.id.cmp(&b.id)))
    }

    pub fn sort(self, posts: &mut [Post]) {
        posts.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_spellings() {
        assert_eq!(PostSortKey::parse("PostedDate"), Some(PostSortKey::PostedDate));
        assert_eq!(PostSortKey::parse("view_count"), Some(PostSortKey::ViewCount));
        assert_eq!(PostSortKey::parse("title"), Some(PostSortKey::Title));
        assert_eq!(PostSortKey::parse("rank"), None);
    }

    #[test]
    fn default_is_newest_first() {
        let ordering = PostOrdering::default();
        assert_eq!(ordering.key, PostSortKey::PostedDate);
        assert_eq!(ordering.direction, SortDirection::Desc);
    }
}
