// src/application/commands/authors.rs
use std::sync::Arc;

use crate::{
    application::{
        cache::{CacheAside, CacheKey},
        commands::{embedding_post_keys, resolve_slug},
        dto::AuthorDto,
        error::{ApplicationError, ApplicationResult},
        ports::{ClockPort, MediaStorePort, SlugGeneratorPort},
    },
    domain::{
        author::{
            Author, AuthorRepository, AuthorUpdate, NewAuthor,
            entity::{MAX_FULL_NAME_LEN, MAX_NOTES_LEN},
        },
        post::{PostQuery, PostReadRepository},
        value_objects::{AuthorId, Email, Slug, optional_text, required_text},
    },
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct AuthorCommand {
    pub full_name: String,
    pub email: String,
    pub slug: Option<String>,
    /// Defaults to now on create and to the stored date on update.
    pub joined_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

pub struct AuthorCommandService {
    repo: Arc<dyn AuthorRepository>,
    posts: Arc<dyn PostReadRepository>,
    slugger: Arc<SlugGeneratorPort>,
    media: Arc<MediaStorePort>,
    clock: Arc<ClockPort>,
    cache: CacheAside,
}

impl AuthorCommandService {
    #[must_use]
    pub const fn new(
        repo: Arc<dyn AuthorRepository>,
        posts: Arc<dyn PostReadRepository>,
        slugger: Arc<SlugGeneratorPort>,
        media: Arc<MediaStorePort>,
        clock: Arc<ClockPort>,
        cache: CacheAside,
    ) -> Self {
        Self {
            repo,
            posts,
            slugger,
            media,
            clock,
            cache,
        }
    }

    pub async fn create_author(&self, command: AuthorCommand) -> ApplicationResult<AuthorDto> {
        let full_name = required_text("full name", command.full_name, MAX_FULL_NAME_LEN)?;
        let email = Email::new(command.email)?;
        let notes = optional_text("notes", command.notes, MAX_NOTES_LEN)?;
        let slug = resolve_slug(self.slugger.as_ref(), command.slug, &full_name)?;
        self.ensure_slug_available(&slug, None).await?;

        let created = self
            .repo
            .insert(NewAuthor {
                full_name,
                email,
                slug,
                joined_date: command.joined_date.unwrap_or_else(|| self.clock.now()),
                notes,
            })
            .await?;
        info!(author_id = %created.id, slug = %created.slug, "author created");
        Ok(created.into())
    }

    pub async fn update_author(
        &self,
        id: i64,
        command: AuthorCommand,
    ) -> ApplicationResult<AuthorDto> {
        let id = AuthorId::new(id)?;
        let full_name = required_text("full name", command.full_name, MAX_FULL_NAME_LEN)?;
        let email = Email::new(command.email)?;
        let notes = optional_text("notes", command.notes, MAX_NOTES_LEN)?;
        let current = self.load(id).await?;
        let slug = match command.slug.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Slug::new(value)?,
            _ => current.slug.clone(),
        };
        self.ensure_slug_available(&slug, Some(id)).await?;
        let post_keys = embedding_post_keys(
            self.posts.as_ref(),
            &PostQuery::new().with_author_id(id.into()),
        )
        .await?;

        let updated = self
            .repo
            .update(AuthorUpdate {
                id,
                full_name,
                email,
                slug,
                joined_date: command.joined_date.unwrap_or(current.joined_date),
                notes,
            })
            .await?
            .ok_or_else(|| not_found(id))?;
        self.invalidate(&current).await;
        self.cache.invalidate(post_keys).await;
        if updated.slug != current.slug {
            self.cache
                .invalidate([CacheKey::by_slug(CacheKey::AUTHOR, &updated.slug)])
                .await;
        }
        info!(author_id = %id, "author updated");
        Ok(updated.into())
    }

    /// Refused with a conflict while the author still owns posts.
    pub async fn delete_author(&self, id: i64) -> ApplicationResult<()> {
        let id = AuthorId::new(id)?;
        let current = self.load(id).await?;
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        self.invalidate(&current).await;
        if let Some(url) = &current.image_url {
            self.discard_image(id, url).await;
        }
        info!(author_id = %id, "author deleted");
        Ok(())
    }

    pub async fn set_author_image(
        &self,
        id: i64,
        data: Bytes,
        file_name: &str,
        content_type: &str,
    ) -> ApplicationResult<AuthorDto> {
        let id = AuthorId::new(id)?;
        let current = self.load(id).await?;

        let url = self.media.save(data, file_name, content_type).await?;
        if !self.repo.set_image_url(id, Some(url.clone())).await? {
            self.discard_image(id, &url).await;
            return Err(not_found(id));
        }
        self.invalidate(&current).await;
        if let Some(old) = current.image_url.as_deref().filter(|old| *old != url) {
            self.discard_image(id, old).await;
        }

        info!(author_id = %id, url = %url, "author image replaced");
        Ok(Author {
            image_url: Some(url),
            ..current
        }
        .into())
    }

    async fn load(&self, id: AuthorId) -> ApplicationResult<Author> {
        self.repo.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    async fn ensure_slug_available(
        &self,
        slug: &Slug,
        exclude: Option<AuthorId>,
    ) -> ApplicationResult<()> {
        if self.repo.slug_exists(slug, exclude).await? {
            return Err(ApplicationError::slug_taken(slug));
        }
        Ok(())
    }

    async fn invalidate(&self, author: &Author) {
        self.cache
            .invalidate([
                CacheKey::by_id(CacheKey::AUTHOR, author.id),
                CacheKey::by_slug(CacheKey::AUTHOR, &author.slug),
            ])
            .await;
    }

    async fn discard_image(&self, id: AuthorId, url: &str) {
        if let Err(err) = self.media.delete(url).await {
            warn!(author_id = %id, url, error = %err, "failed to remove author image");
        }
    }
}

fn not_found(id: AuthorId) -> ApplicationError {
    ApplicationError::not_found(format!("author {id} not found"))
}
