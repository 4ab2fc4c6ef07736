// src/application/queries/posts/mod.rs
mod get;
mod list;
mod service;
mod stats;

pub use service::PostQueryService;
pub use stats::MAX_ARCHIVE_MONTHS;
