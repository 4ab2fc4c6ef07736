// src/infrastructure/cache/mod.rs
mod memory;
mod redis;

pub use memory::InMemoryLookupCache;
pub use self::redis::RedisLookupCache;
