use super::PostQueryService;
use crate::application::{
    dto::{ArchiveEntryDto, PostDto},
    error::ApplicationResult,
    queries::bounded_limit,
};

pub const MAX_ARCHIVE_MONTHS: u32 = 120;

impl PostQueryService {
    /// Most viewed published posts.
    pub async fn popular_posts(&self, limit: u32) -> ApplicationResult<Vec<PostDto>> {
        let posts = self.read_repo.popular(bounded_limit(limit)).await?;
        Ok(posts.into_iter().map(Into::into).collect())
    }

    pub async fn random_posts(&self, limit: u32) -> ApplicationResult<Vec<PostDto>> {
        let posts = self.read_repo.random(bounded_limit(limit)).await?;
        Ok(posts.into_iter().map(Into::into).collect())
    }

    /// Published post counts for the latest `months` months that have posts.
    pub async fn archives(&self, months: u32) -> ApplicationResult<Vec<ArchiveEntryDto>> {
        let entries = self
            .read_repo
            .archives(months.clamp(1, MAX_ARCHIVE_MONTHS))
            .await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }
}
