// src/application/commands/posts/service.rs
use std::sync::Arc;

use crate::{
    application::{
        cache::{CacheAside, CacheKey},
        error::{ApplicationError, ApplicationResult},
        ports::{ClockPort, MediaStorePort, SlugGeneratorPort},
        services::Repositories,
    },
    domain::{
        author::AuthorRepository,
        category::CategoryRepository,
        post::{Post, PostReadRepository, PostWriteRepository},
        value_objects::{AuthorId, CategoryId, PostId, Slug},
    },
};

/// Ports the post write paths call out to.
pub struct PostCommandPorts {
    pub slugger: Arc<SlugGeneratorPort>,
    pub media: Arc<MediaStorePort>,
    pub clock: Arc<ClockPort>,
    pub cache: CacheAside,
}

pub struct PostCommandService {
    pub(super) write_repo: Arc<dyn PostWriteRepository>,
    pub(super) read_repo: Arc<dyn PostReadRepository>,
    pub(super) author_repo: Arc<dyn AuthorRepository>,
    pub(super) category_repo: Arc<dyn CategoryRepository>,
    pub(super) slugger: Arc<SlugGeneratorPort>,
    pub(super) media: Arc<MediaStorePort>,
    pub(super) clock: Arc<ClockPort>,
    pub(super) cache: CacheAside,
}

impl PostCommandService {
    #[must_use]
    pub fn new(repos: &Repositories, ports: PostCommandPorts) -> Self {
        Self {
            write_repo: Arc::clone(&repos.post_write),
            read_repo: Arc::clone(&repos.post_read),
            author_repo: Arc::clone(&repos.authors),
            category_repo: Arc::clone(&repos.categories),
            slugger: ports.slugger,
            media: ports.media,
            clock: ports.clock,
            cache: ports.cache,
        }
    }

    pub(super) async fn load(&self, id: PostId) -> ApplicationResult<Post> {
        self.read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("post {id} not found")))
    }

    pub(super) async fn ensure_slug_available(
        &self,
        slug: &Slug,
        exclude: Option<PostId>,
    ) -> ApplicationResult<()> {
        if self.read_repo.slug_exists(slug, exclude).await? {
            return Err(ApplicationError::slug_taken(slug));
        }
        Ok(())
    }

    pub(super) async fn ensure_references(
        &self,
        author_id: AuthorId,
        category_id: Option<CategoryId>,
    ) -> ApplicationResult<()> {
        if self.author_repo.find_by_id(author_id).await?.is_none() {
            return Err(ApplicationError::not_found(format!(
                "author {author_id} not found"
            )));
        }
        if let Some(category_id) = category_id {
            if self.category_repo.find_by_id(category_id).await?.is_none() {
                return Err(ApplicationError::not_found(format!(
                    "category {category_id} not found"
                )));
            }
        }
        Ok(())
    }

    pub(super) async fn invalidate(&self, id: PostId) {
        self.cache
            .invalidate([CacheKey::by_id(CacheKey::POST, id)])
            .await;
    }
}
