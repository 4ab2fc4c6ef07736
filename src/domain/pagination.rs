// src/domain/pagination.rs
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Normalized paging parameters. Page number and size are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    /// Values below 1 become 1; the page size is capped at [`MAX_PAGE_SIZE`].
    #[must_use]
    pub fn new(page_number: i64, page_size: i64) -> Self {
        let page_number = u32::try_from(page_number.max(1)).unwrap_or(u32::MAX);
        let page_size = u32::try_from(page_size.clamp(1, i64::from(MAX_PAGE_SIZE)))
            .unwrap_or(MAX_PAGE_SIZE);
        Self {
            page_number,
            page_size,
        }
    }

    #[must_use]
    pub const fn page_number(self) -> u32 {
        self.page_number
    }

    #[must_use]
    pub const fn page_size(self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page_number - 1) * u64::from(self.page_size)
    }

    #[must_use]
    pub fn limit(self) -> u64 {
        u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, i64::from(DEFAULT_PAGE_SIZE))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    #[must_use]
    pub const fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// One page of an ordered collection plus its count metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedList<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
}

impl<T> PagedList<T> {
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_count: u64) -> Self {
        Self {
            items,
            page_number: request.page_number(),
            page_size: request.page_size(),
            total_count,
            total_pages: total_pages(total_count, request.page_size()),
        }
    }

    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.page_number > 1
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        u64::from(self.page_number) < self.total_pages
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedList<U> {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

/// Ceiling division; zero items means zero pages.
#[must_use]
pub fn total_pages(total_count: u64, page_size: u32) -> u64 {
    if total_count == 0 || page_size == 0 {
        0
    } else {
        total_count.div_ceil(u64::from(page_size))
    }
}

/// Slices an already ordered collection. An offset past the end yields an
/// empty page that still reports the true totals.
#[must_use]
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> PagedList<T> {
    let total = u64::try_from(items.len()).unwrap_or(u64::MAX);
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let page_items = items
        .into_iter()
        .skip(offset)
        .take(usize::try_from(request.page_size()).unwrap_or(usize::MAX))
        .collect();
    PagedList::new(page_items, request, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_paging_is_normalized() {
        let request = PageRequest::new(0, -5);
        assert_eq!(request.page_number(), 1);
        assert_eq!(request.page_size(), 1);
        assert_eq!(request.offset(), 0);

        let capped = PageRequest::new(2, 10_000);
        assert_eq!(capped.page_size(), MAX_PAGE_SIZE);
        assert_eq!(capped.offset(), u64::from(MAX_PAGE_SIZE));
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        for size in 1..=12u32 {
            for total in 0..=50u64 {
                let expected = if total == 0 {
                    0
                } else {
                    (total + u64::from(size) - 1) / u64::from(size)
                };
                assert_eq!(total_pages(total, size), expected, "total={total} size={size}");
            }
        }
    }

    #[test]
    fn twenty_five_items_in_pages_of_ten() {
        let items: Vec<u32> = (1..=25).collect();

        let first = paginate(items.clone(), PageRequest::new(1, 10));
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next_page());
        assert!(!first.has_previous_page());

        let third = paginate(items.clone(), PageRequest::new(3, 10));
        assert_eq!(third.items, vec![21, 22, 23, 24, 25]);
        assert!(!third.has_next_page());

        let fourth = paginate(items, PageRequest::new(4, 10));
        assert!(fourth.items.is_empty());
        assert_eq!(fourth.total_count, 25);
        assert_eq!(fourth.total_pages, 3);
    }

    #[test]
    fn empty_collection_has_zero_pages() {
        let page = paginate(Vec::<u8>::new(), PageRequest::default());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_count, 0);
        assert!(!page.has_next_page());
    }

    #[test]
    fn map_keeps_metadata() {
        let page = paginate(vec![1, 2, 3], PageRequest::new(1, 2)).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 2);
    }
}
