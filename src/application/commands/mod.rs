// src/application/commands/mod.rs
pub mod authors;
pub mod categories;
pub mod posts;
pub mod tags;

use crate::{
    application::{
        cache::CacheKey,
        error::{ApplicationError, ApplicationResult},
        ports::SlugGeneratorPort,
    },
    domain::{
        post::{PostOrdering, PostQuery, PostReadRepository},
        value_objects::Slug,
    },
};

/// Uses the caller's slug when one is given, otherwise derives it from `source`.
pub(crate) fn resolve_slug(
    slugger: &SlugGeneratorPort,
    explicit: Option<String>,
    source: &str,
) -> ApplicationResult<Slug> {
    match explicit.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => Ok(Slug::new(value)?),
        None => Slug::new(slugger.slugify(source)).map_err(|_| {
            ApplicationError::validation(format!("cannot derive a slug from '{source}'"))
        }),
    }
}

/// Cache keys of the posts matching `query`. Collected before a write that
/// changes the category, tag or author those posts embed.
pub(crate) async fn embedding_post_keys(
    posts: &dyn PostReadRepository,
    query: &PostQuery,
) -> ApplicationResult<Vec<String>> {
    let matched = posts.list(query, PostOrdering::default()).await?;
    Ok(matched
        .iter()
        .map(|post| CacheKey::by_id(CacheKey::POST, post.id))
        .collect())
}
