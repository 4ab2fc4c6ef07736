use crate::domain::category::{Category, CategoryItem};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub show_on_menu: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_count: Option<i64>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.into(),
            name: category.name,
            slug: category.slug.into_inner(),
            description: category.description,
            show_on_menu: category.show_on_menu,
            post_count: None,
        }
    }
}

impl From<CategoryItem> for CategoryDto {
    fn from(item: CategoryItem) -> Self {
        Self {
            post_count: Some(item.post_count),
            ..Self::from(item.category)
        }
    }
}
