use super::PostQueryService;
use crate::{
    application::{dto::PostDto, error::ApplicationResult},
    domain::{
        pagination::{PageRequest, PagedList},
        post::{PostOrdering, PostQuery},
    },
};
use tracing::debug;

impl PostQueryService {
    pub async fn list_posts(
        &self,
        query: &PostQuery,
        request: PageRequest,
        ordering: PostOrdering,
    ) -> ApplicationResult<PagedList<PostDto>> {
        debug!(
            clauses = query.filters().len(),
            page = request.page_number(),
            size = request.page_size(),
            "listing posts"
        );
        let page = self.read_repo.page(query, request, ordering).await?;
        Ok(page.map(Into::into))
    }

    pub async fn count_posts(&self, query: &PostQuery) -> ApplicationResult<u64> {
        Ok(self.read_repo.count(query).await?)
    }
}
