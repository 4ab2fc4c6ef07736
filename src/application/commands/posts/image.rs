// src/application/commands/posts/image.rs
use super::PostCommandService;
use crate::{
    application::{
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::value_objects::PostId,
};
use bytes::Bytes;
use tracing::{info, warn};

impl PostCommandService {
    /// Stores a new cover image and drops the one it replaces.
    pub async fn set_post_image(
        &self,
        id: i64,
        data: Bytes,
        file_name: &str,
        content_type: &str,
    ) -> ApplicationResult<PostDto> {
        let id = PostId::new(id)?;
        let previous = self.load(id).await?.image_url;

        let url = self.media.save(data, file_name, content_type).await?;
        if !self.write_repo.set_image_url(id, Some(url.clone())).await? {
            self.discard_image(id, &url).await;
            return Err(ApplicationError::not_found(format!("post {id} not found")));
        }
        self.invalidate(id).await;

        if let Some(old) = previous.filter(|old| *old != url) {
            self.discard_image(id, &old).await;
        }

        info!(post_id = %id, url = %url, "post image replaced");
        Ok(self.load(id).await?.into())
    }

    async fn discard_image(&self, id: PostId, url: &str) {
        if let Err(err) = self.media.delete(url).await {
            warn!(post_id = %id, url = %url, error = %err, "failed to remove post image");
        }
    }
}
