// src/application/queries/posts/get.rs
use super::PostQueryService;
use crate::{
    application::{
        cache::CacheKey,
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        post::{Post, PostQuery},
        value_objects::{PostId, Slug},
    },
};

impl PostQueryService {
    /// Cache-aside lookup by id. Drafts are returned too.
    pub async fn get_post_by_id(&self, id: i64) -> ApplicationResult<PostDto> {
        let id = PostId::new(id)?;
        let key = CacheKey::by_id(CacheKey::POST, id);
        let post: Option<Post> = self
            .cache
            .get_or_load(&key, || async {
                self.read_repo.find_by_id(id).await.map_err(ApplicationError::from)
            })
            .await?;
        post.map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("post {id} not found")))
    }

    pub async fn get_post_by_slug(&self, slug: &str) -> ApplicationResult<PostDto> {
        let slug = Slug::new(slug)?;
        self.read_repo
            .find_by_slug(&slug)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("post '{slug}' not found")))
    }

    /// Resolves a `/{year}/{month}/{slug}` permalink. Drafts have no permalink.
    pub async fn get_post_by_permalink(
        &self,
        year: i32,
        month: u32,
        slug: &str,
    ) -> ApplicationResult<PostDto> {
        let slug = Slug::new(slug)?;
        self.read_repo
            .find_by_posted_slug(year, month, &slug)
            .await?
            .filter(|post| post.published)
            .map(Into::into)
            .ok_or_else(|| {
                ApplicationError::not_found(format!("post {year}/{month:02}/{slug} not found"))
            })
    }

    /// First match under the default ordering, if any.
    pub async fn find_post(&self, query: &PostQuery) -> ApplicationResult<Option<PostDto>> {
        Ok(self.read_repo.find_one(query).await?.map(Into::into))
    }

    /// True when no other post uses `slug`.
    pub async fn post_slug_available(
        &self,
        slug: &str,
        exclude: Option<i64>,
    ) -> ApplicationResult<bool> {
        let slug = Slug::new(slug)?;
        let exclude = exclude.map(PostId::new).transpose()?;
        Ok(!self.read_repo.slug_exists(&slug, exclude).await?)
    }
}
