// src/application/queries/mod.rs
pub mod authors;
pub mod categories;
pub mod posts;
pub mod tags;

use crate::domain::pagination::MAX_PAGE_SIZE;

/// Clamps a caller-supplied result limit into `1..=MAX_PAGE_SIZE`.
#[must_use]
pub(crate) fn bounded_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_PAGE_SIZE)
}
