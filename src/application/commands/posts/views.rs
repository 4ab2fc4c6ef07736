use super::PostCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::value_objects::PostId,
};
use tracing::debug;

impl PostCommandService {
    pub async fn record_view(&self, id: i64) -> ApplicationResult<()> {
        let id = PostId::new(id)?;
        if !self.write_repo.increment_view_count(id).await? {
            return Err(ApplicationError::not_found(format!("post {id} not found")));
        }
        self.invalidate(id).await;
        debug!(post_id = %id, "post view recorded");
        Ok(())
    }
}
