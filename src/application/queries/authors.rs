// src/application/queries/authors.rs
use std::sync::Arc;

use crate::{
    application::{
        cache::{CacheAside, CacheKey},
        dto::AuthorDto,
        error::{ApplicationError, ApplicationResult},
        queries::bounded_limit,
    },
    domain::{
        author::{Author, AuthorRepository},
        pagination::{PageRequest, PagedList},
        value_objects::{AuthorId, Slug},
    },
};

pub struct AuthorQueryService {
    repo: Arc<dyn AuthorRepository>,
    cache: CacheAside,
}

impl AuthorQueryService {
    #[must_use]
    pub const fn new(repo: Arc<dyn AuthorRepository>, cache: CacheAside) -> Self {
        Self { repo, cache }
    }

    pub async fn get_author_by_id(&self, id: i64) -> ApplicationResult<AuthorDto> {
        let id = AuthorId::new(id)?;
        let key = CacheKey::by_id(CacheKey::AUTHOR, id);
        let author: Option<Author> = self
            .cache
            .get_or_load(&key, || async {
                self.repo.find_by_id(id).await.map_err(ApplicationError::from)
            })
            .await?;
        author
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("author {id} not found")))
    }

    pub async fn get_author_by_slug(&self, slug: &str) -> ApplicationResult<AuthorDto> {
        let slug = Slug::new(slug)?;
        let key = CacheKey::by_slug(CacheKey::AUTHOR, &slug);
        let author: Option<Author> = self
            .cache
            .get_or_load(&key, || async {
                self.repo.find_by_slug(&slug).await.map_err(ApplicationError::from)
            })
            .await?;
        author
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("author '{slug}' not found")))
    }

    pub async fn list_authors(&self) -> ApplicationResult<Vec<AuthorDto>> {
        let items = self.repo.list().await?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    pub async fn page_authors(
        &self,
        name: Option<&str>,
        request: PageRequest,
    ) -> ApplicationResult<PagedList<AuthorDto>> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        Ok(self.repo.page(name, request).await?.map(Into::into))
    }

    /// Authors with the most published posts.
    pub async fn popular_authors(&self, limit: u32) -> ApplicationResult<Vec<AuthorDto>> {
        let items = self.repo.popular(bounded_limit(limit)).await?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    pub async fn author_slug_available(
        &self,
        slug: &str,
        exclude: Option<i64>,
    ) -> ApplicationResult<bool> {
        let slug = Slug::new(slug)?;
        let exclude = exclude.map(AuthorId::new).transpose()?;
        Ok(!self.repo.slug_exists(&slug, exclude).await?)
    }
}
