use super::PostCommandService;
use crate::{
    application::{
        dto::PublishStateDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::value_objects::PostId,
};
use tracing::info;

impl PostCommandService {
    /// Flips the published flag, stamps the modification time and returns the
    /// new state.
    pub async fn toggle_published(&self, id: i64) -> ApplicationResult<PublishStateDto> {
        let id = PostId::new(id)?;
        let published = self
            .write_repo
            .toggle_published(id, self.clock.now())
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("post {id} not found")))?;
        self.invalidate(id).await;

        info!(post_id = %id, published, "post publish state toggled");
        Ok(PublishStateDto {
            id: id.into(),
            published,
        })
    }
}
