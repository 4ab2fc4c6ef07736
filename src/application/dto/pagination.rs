use crate::domain::pagination::PagedList;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON envelope for one page of results.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> PagedResponse<T> {
    #[must_use]
    pub fn from_page<U>(page: PagedList<U>) -> Self
    where
        U: Into<T>,
    {
        let has_previous_page = page.has_previous_page();
        let has_next_page = page.has_next_page();
        Self {
            items: page.items.into_iter().map(Into::into).collect(),
            page_number: page.page_number,
            page_size: page.page_size,
            total_count: page.total_count,
            total_pages: page.total_pages,
            has_previous_page,
            has_next_page,
        }
    }
}
