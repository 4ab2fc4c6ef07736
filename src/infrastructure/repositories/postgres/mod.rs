// src/infrastructure/repositories/postgres/mod.rs
mod authors;
mod categories;
mod post_filter_sql;
mod posts;
mod tags;

pub use authors::PostgresAuthorRepository;
pub use categories::PostgresCategoryRepository;
pub use posts::{PostgresPostReadRepository, PostgresPostWriteRepository};
pub use tags::PostgresTagRepository;

use crate::domain::pagination::PageRequest;
use sqlx::{Postgres, QueryBuilder};

fn push_limit_offset(builder: &mut QueryBuilder<'_, Postgres>, request: PageRequest) {
    builder
        .push(" LIMIT ")
        .push_bind(i64::try_from(request.limit()).unwrap_or(i64::MAX))
        .push(" OFFSET ")
        .push_bind(i64::try_from(request.offset()).unwrap_or(i64::MAX));
}

fn u64_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}
