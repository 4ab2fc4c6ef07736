use crate::domain::author::{Author, AuthorItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorDto {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub slug: String,
    pub joined_date: DateTime<Utc>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_count: Option<i64>,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.into(),
            full_name: author.full_name,
            email: author.email.into(),
            slug: author.slug.into_inner(),
            joined_date: author.joined_date,
            image_url: author.image_url,
            notes: author.notes,
            post_count: None,
        }
    }
}

impl From<AuthorItem> for AuthorDto {
    fn from(item: AuthorItem) -> Self {
        Self {
            post_count: Some(item.post_count),
            ..Self::from(item.author)
        }
    }
}
