use crate::domain::tag::{Tag, TagItem};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_count: Option<i64>,
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id.into(),
            name: tag.name,
            slug: tag.slug.into_inner(),
            description: tag.description,
            post_count: None,
        }
    }
}

impl From<TagItem> for TagDto {
    fn from(item: TagItem) -> Self {
        Self {
            post_count: Some(item.post_count),
            ..Self::from(item.tag)
        }
    }
}
