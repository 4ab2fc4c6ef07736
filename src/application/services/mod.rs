// src/application/services/mod.rs
use std::sync::Arc;
use std::time::Duration;

use crate::{
    application::{
        cache::CacheAside,
        commands::{
            authors::AuthorCommandService, categories::CategoryCommandService,
            posts::{PostCommandPorts, PostCommandService},
            tags::TagCommandService,
        },
        ports::{ClockPort, LookupCachePort, MediaStorePort, SlugGeneratorPort},
        queries::{
            authors::AuthorQueryService, categories::CategoryQueryService,
            posts::PostQueryService, tags::TagQueryService,
        },
    },
    domain::{
        author::AuthorRepository,
        category::CategoryRepository,
        post::{PostReadRepository, PostWriteRepository},
        tag::TagRepository,
    },
};

/// Storage backends the services are assembled from.
#[derive(Clone)]
pub struct Repositories {
    pub post_write: Arc<dyn PostWriteRepository>,
    pub post_read: Arc<dyn PostReadRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub authors: Arc<dyn AuthorRepository>,
}

pub struct ApplicationServices {
    pub post_commands: Arc<PostCommandService>,
    pub post_queries: Arc<PostQueryService>,
    pub category_commands: Arc<CategoryCommandService>,
    pub category_queries: Arc<CategoryQueryService>,
    pub tag_commands: Arc<TagCommandService>,
    pub tag_queries: Arc<TagQueryService>,
    pub author_commands: Arc<AuthorCommandService>,
    pub author_queries: Arc<AuthorQueryService>,
}

impl ApplicationServices {
    #[must_use]
    pub fn new(
        repos: Repositories,
        cache: Arc<LookupCachePort>,
        cache_ttl: Duration,
        media: Arc<MediaStorePort>,
        clock: Arc<ClockPort>,
        slugger: Arc<SlugGeneratorPort>,
    ) -> Self {
        let cache = CacheAside::new(cache, cache_ttl);

        let post_commands = Arc::new(PostCommandService::new(
            &repos,
            PostCommandPorts {
                slugger: Arc::clone(&slugger),
                media: Arc::clone(&media),
                clock: Arc::clone(&clock),
                cache: cache.clone(),
            },
        ));
        let post_queries = Arc::new(PostQueryService::new(
            Arc::clone(&repos.post_read),
            cache.clone(),
        ));

        let category_commands = Arc::new(CategoryCommandService::new(
            Arc::clone(&repos.categories),
            Arc::clone(&repos.post_read),
            Arc::clone(&slugger),
            cache.clone(),
        ));
        let category_queries = Arc::new(CategoryQueryService::new(
            Arc::clone(&repos.categories),
            cache.clone(),
        ));

        let tag_commands = Arc::new(TagCommandService::new(
            Arc::clone(&repos.tags),
            Arc::clone(&repos.post_read),
            Arc::clone(&slugger),
            cache.clone(),
        ));
        let tag_queries = Arc::new(TagQueryService::new(Arc::clone(&repos.tags), cache.clone()));

        let author_commands = Arc::new(AuthorCommandService::new(
            Arc::clone(&repos.authors),
            Arc::clone(&repos.post_read),
            slugger,
            media,
            clock,
            cache.clone(),
        ));
        let author_queries = Arc::new(AuthorQueryService::new(repos.authors, cache));

        Self {
            post_commands,
            post_queries,
            category_commands,
            category_queries,
            tag_commands,
            tag_queries,
            author_commands,
            author_queries,
        }
    }
}
