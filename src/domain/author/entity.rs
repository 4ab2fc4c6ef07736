// src/domain/author/entity.rs
use crate::domain::value_objects::{AuthorId, Email, Slug};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_FULL_NAME_LEN: usize = 100;
pub const MAX_NOTES_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub full_name: String,
    pub email: Email,
    pub slug: Slug,
    pub joined_date: DateTime<Utc>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorItem {
    pub author: Author,
    pub post_count: i64,
}

#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub full_name: String,
    pub email: Email,
    pub slug: Slug,
    pub joined_date: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AuthorUpdate {
    pub id: AuthorId,
    pub full_name: String,
    pub email: Email,
    pub slug: Slug,
    pub joined_date: DateTime<Utc>,
    pub notes: Option<String>,
}
