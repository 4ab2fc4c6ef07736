// src/application/commands/posts/create.rs
use super::PostCommandService;
use crate::{
    application::{commands::resolve_slug, dto::PostDto, error::ApplicationResult},
    domain::{
        post::{
            NewPost,
            entity::{MAX_META_LEN, MAX_SHORT_DESCRIPTION_LEN, MAX_TITLE_LEN},
        },
        value_objects::{AuthorId, CategoryId, optional_text, required_text},
    },
};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct CreatePostCommand {
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
    pub async fn create_post(&self, command: CreatePostCommand) -> ApplicationResult<PostDto> {
        let title = required_text("title", command.title, MAX_TITLE_LEN)?;
        let short_description = required_text(
            "short description",
            command.short_description,
            MAX_SHORT_DESCRIPTION_LEN,
        )?;
        let description = required_text("description", command.description, usize::MAX)?;
        let meta = optional_text("meta", command.meta, MAX_META_LEN)?.unwrap_or_default();
        let slug = resolve_slug(self.slugger.as_ref(), command.slug, &title)?;
        let author_id = AuthorId::new(command.author_id)?;
        let category_id = command.category_id.map(CategoryId::new).transpose()?;
        let tags = self.tag_labels(command.tags)?;

        self.ensure_slug_available(&slug, None).await?;
        self.ensure_references(author_id, category_id).await?;

        let created = self
            .write_repo
            .insert(NewPost {
                title,
                short_description,
                description,
                slug,
                meta,
                image_url: None,
                published: command.published,
                posted_date: self.clock.now(),
                author_id,
                category_id,
                tags,
            })
            .await?;

        info!(post_id = %created.id, slug = %created.slug, "post created");
        Ok(created.into())
    }
}
