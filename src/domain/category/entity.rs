// src/domain/category/entity.rs
use crate::domain::value_objects::{CategoryId, Slug};
use serde::{Deserialize, Serialize};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: Slug,
    pub description: String,
    pub show_on_menu: bool,
}

/// Category together with the number of published posts filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryItem {
    pub category: Category,
    pub post_count: i64,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub slug: Slug,
    pub description: String,
    pub show_on_menu: bool,
}

#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub id: CategoryId,
    pub name: String,
    pub slug: Slug,
    pub description: String,
    pub show_on_menu: bool,
}
