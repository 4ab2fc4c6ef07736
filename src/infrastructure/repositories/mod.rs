// src/infrastructure/repositories/mod.rs
mod error;
pub mod memory;
pub mod postgres;

pub use error::map_sqlx;
pub use memory::InMemoryStore;
pub use postgres::{
    PostgresAuthorRepository, PostgresCategoryRepository, PostgresPostReadRepository,
    PostgresPostWriteRepository, PostgresTagRepository,
};

use crate::application::services::Repositories;
use sqlx::PgPool;
use std::sync::Arc;

#[must_use]
pub fn postgres_repositories(pool: PgPool) -> Repositories {
    Repositories {
        post_write: Arc::new(PostgresPostWriteRepository::new(pool.clone())),
        post_read: Arc::new(PostgresPostReadRepository::new(pool.clone())),
        categories: Arc::new(PostgresCategoryRepository::new(pool.clone())),
        tags: Arc::new(PostgresTagRepository::new(pool.clone())),
        authors: Arc::new(PostgresAuthorRepository::new(pool)),
    }
}

/// Every repository backed by the same shared store.
#[must_use]
pub fn memory_repositories(store: InMemoryStore) -> Repositories {
    let store = Arc::new(store);
    Repositories {
        post_write: store.clone(),
        post_read: store.clone(),
        categories: store.clone(),
        tags: store.clone(),
        authors: store,
    }
}
