use std::sync::Arc;

use crate::{application::cache::CacheAside, domain::post::PostReadRepository};

pub struct PostQueryService {
    pub(super) read_repo: Arc<dyn PostReadRepository>,
    pub(super) cache: CacheAside,
}

impl PostQueryService {
    #[must_use]
    pub const fn new(read_repo: Arc<dyn PostReadRepository>, cache: CacheAside) -> Self {
        Self { read_repo, cache }
    }
}
