// src/domain/tag/entity.rs
use crate::domain::value_objects::{Slug, TagId};
use serde::{Deserialize, Serialize};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub slug: Slug,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagItem {
    pub tag: Tag,
    pub post_count: i64,
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
    pub slug: Slug,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct TagUpdate {
    pub id: TagId,
    pub name: String,
    pub slug: Slug,
    pub description: String,
}
