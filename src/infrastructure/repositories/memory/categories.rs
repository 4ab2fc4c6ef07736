// src/infrastructure/repositories/memory/categories.rs
use async_trait::async_trait;

use super::{InMemoryStore, StoreState, by_name, name_contains, slug_conflict};
use crate::domain::{
    category::{Category, CategoryItem, CategoryRepository, CategoryUpdate, NewCategory},
    errors::DomainResult,
    pagination::{PageRequest, PagedList, paginate},
    value_objects::{CategoryId, Slug},
};

impl StoreState {
    fn category_items(&self, keep: impl Fn(&Category) -> bool) -> Vec<CategoryItem> {
        let mut items: Vec<CategoryItem> = self
            .categories
            .values()
            .filter(|category| keep(category))
            .map(|category| CategoryItem {
                category: category.clone(),
                post_count: self
                    .published_posts_where(|post| post.category_id == Some(category.id)),
            })
            .collect();
        items.sort_by(|a, b| {
            by_name(&a.category.name, &b.category.name).then(a.category.id.cmp(&b.category.id))
        });
        items
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        Ok(self.state.read().await.categories.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Category>> {
        let state = self.state.read().await;
        Ok(state
            .categories
            .values()
            .find(|category| category.slug == *slug)
            .cloned())
    }

    async fn list(&self, show_on_menu_only: bool) -> DomainResult<Vec<CategoryItem>> {
        let state = self.state.read().await;
        Ok(state.category_items(|category| !show_on_menu_only || category.show_on_menu))
    }

    async fn page(
        &self,
        name: Option<&str>,
        request: PageRequest,
    ) -> DomainResult<PagedList<CategoryItem>> {
        let state = self.state.read().await;
        let items = state.category_items(|category| name_contains(&category.name, name));
        Ok(paginate(items, request))
    }

    async fn slug_exists(&self, slug: &Slug, exclude: Option<CategoryId>) -> DomainResult<bool> {
        let state = self.state.read().await;
        Ok(state
            .categories
            .values()
            .any(|category| category.slug == *slug && Some(category.id) != exclude))
    }

    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let mut state = self.state.write().await;
        if state.categories.values().any(|c| c.slug == category.slug) {
            return Err(slug_conflict());
        }
        let id = CategoryId(state.next_id());
        let created = Category {
            id,
            name: category.name,
            slug: category.slug,
            description: category.description,
            show_on_menu: category.show_on_menu,
        };
        state.categories.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<Option<Category>> {
        let mut state = self.state.write().await;
        if state
            .categories
            .values()
            .any(|c| c.slug == update.slug && c.id != update.id)
        {
            return Err(slug_conflict());
        }
        let Some(category) = state.categories.get_mut(&update.id) else {
            return Ok(None);
        };
        category.name = update.name;
        category.slug = update.slug;
        category.description = update.description;
        category.show_on_menu = update.show_on_menu;
        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<bool> {
        let mut state = self.state.write().await;
        if state.categories.remove(&id).is_none() {
            return Ok(false);
        }
        for post in state.posts.values_mut() {
            if post.category_id == Some(id) {
                post.category_id = None;
            }
        }
        Ok(true)
    }

    async fn toggle_show_on_menu(&self, id: CategoryId) -> DomainResult<Option<bool>> {
        let mut state = self.state.write().await;
        Ok(state.categories.get_mut(&id).map(|category| {
            category.show_on_menu = !category.show_on_menu;
            category.show_on_menu
        }))
    }
}
