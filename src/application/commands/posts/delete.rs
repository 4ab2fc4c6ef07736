use super::PostCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::value_objects::PostId,
};
use tracing::{info, warn};

impl PostCommandService {
    pub async fn delete_post(&self, id: i64) -> ApplicationResult<()> {
        let id = PostId::new(id)?;
        let post = self.load(id).await?;

        if !self.write_repo.delete(id).await? {
            return Err(ApplicationError::not_found(format!("post {id} not found")));
        }
        self.invalidate(id).await;

        if let Some(url) = post.image_url {
            if let Err(err) = self.media.delete(&url).await {
                warn!(post_id = %id, url = %url, error = %err, "failed to remove post image");
            }
        }

        info!(post_id = %id, "post deleted");
        Ok(())
    }
}
