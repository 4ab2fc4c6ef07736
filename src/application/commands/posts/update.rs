// src/application/commands/posts/update.rs
use super::PostCommandService;
use crate::{
    application::{
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        post::{
            PostUpdate,
            entity::{MAX_META_LEN, MAX_SHORT_DESCRIPTION_LEN, MAX_TITLE_LEN},
        },
        value_objects::{AuthorId, CategoryId, PostId, Slug, optional_text, required_text},
    },
};
use tracing::info;

/// Replaces every editable field. A missing slug keeps the current one.
#[derive(Debug, Clone, Default)]
pub struct UpdatePostCommand {
    pub id: i64,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub slug: Option<String>,
    pub meta: Option<String>,
    pub published: bool,
    pub author_id: i64,
    pub category_id: Option<i64>,
    pub tags: Vec<String>,
}

impl PostCommandService {
    pub async fn update_post(&self, command: UpdatePostCommand) -> ApplicationResult<PostDto> {
        let id = PostId::new(command.id)?;
        let title = required_text("title", command.title, MAX_TITLE_LEN)?;
        let short_description = required_text(
            "short description",
            command.short_description,
            MAX_SHORT_DESCRIPTION_LEN,
        )?;
        let description = required_text("description", command.description, usize::MAX)?;
        let meta = optional_text("meta", command.meta, MAX_META_LEN)?.unwrap_or_default();
        let explicit_slug = command
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Slug::new)
            .transpose()?;
        let author_id = AuthorId::new(command.author_id)?;
        let category_id = command.category_id.map(CategoryId::new).transpose()?;
        let tags = self.tag_labels(command.tags)?;

        let current = self.load(id).await?;
        let slug = explicit_slug.unwrap_or(current.slug);
        self.ensure_slug_available(&slug, Some(id)).await?;
        self.ensure_references(author_id, category_id).await?;

        let updated = self
            .write_repo
            .update(PostUpdate {
                id,
                title,
                short_description,
                description,
                slug,
                meta,
                published: command.published,
                author_id,
                category_id,
                tags,
                modified_date: self.clock.now(),
            })
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("post {id} not found")))?;
        self.invalidate(id).await;

        info!(post_id = %id, "post updated");
        Ok(updated.into())
    }
}
