// src/infrastructure/repositories/postgres/categories.rs
use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::post_filter_sql::escape_like;
use super::{push_limit_offset, u64_count};
use crate::domain::category::{
    Category, CategoryItem, CategoryRepository, CategoryUpdate, NewCategory,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::{PageRequest, PagedList};
use crate::domain::value_objects::{CategoryId, Slug};
use crate::infrastructure::repositories::map_sqlx;

const ITEM_SELECT: &str = "SELECT c.id, c.name, c.slug, c.description, c.show_on_menu,
            COUNT(p.id) AS post_count
     FROM categories c
     LEFT JOIN posts p ON p.category_id = c.id AND p.published";

#[derive(Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    slug: String,
    description: String,
    show_on_menu: bool,
}

impl TryFrom<CategoryRow> for Category {
    type Error = DomainError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: CategoryId::new(row.id)?,
            name: row.name,
            slug: Slug::new(row.slug)?,
            description: row.description,
            show_on_menu: row.show_on_menu,
        })
    }
}

#[derive(Debug, FromRow)]
struct CategoryItemRow {
    #[sqlx(flatten)]
    category: CategoryRow,
    post_count: i64,
}

impl TryFrom<CategoryItemRow> for CategoryItem {
    type Error = DomainError;

    fn try_from(row: CategoryItemRow) -> Result<Self, Self::Error> {
        Ok(CategoryItem {
            category: row.category.try_into()?,
            post_count: row.post_count,
        })
    }
}

fn push_name_filter(builder: &mut QueryBuilder<'_, Postgres>, name: Option<&str>) {
    if let Some(name) = name {
        builder
            .push(" WHERE c.name ILIKE ")
            .push_bind(format!("%{}%", escape_like(name)))
            .push(" ESCAPE '\\'");
    }
}

impl PostgresCategoryRepository {
    async fn fetch_items(
        &self,
        mut builder: QueryBuilder<'_, Postgres>,
        request: Option<PageRequest>,
    ) -> DomainResult<Vec<CategoryItem>> {
        builder.push(" GROUP BY c.id ORDER BY LOWER(c.name), c.id");
        if let Some(request) = request {
            push_limit_offset(&mut builder, request);
        }
        builder
            .build_query_as::<CategoryItemRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(CategoryItem::try_from)
            .collect()
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, description, show_on_menu FROM categories WHERE id = $1",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .map(Category::try_from)
        .transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Category>> {
        sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, description, show_on_menu FROM categories WHERE slug = $1",
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .map(Category::try_from)
        .transpose()
    }

    async fn list(&self, show_on_menu_only: bool) -> DomainResult<Vec<CategoryItem>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(ITEM_SELECT);
        if show_on_menu_only {
            builder.push(" WHERE c.show_on_menu");
        }
        self.fetch_items(builder, None).await
    }

    async fn page(
        &self,
        name: Option<&str>,
        request: PageRequest,
    ) -> DomainResult<PagedList<CategoryItem>> {
        let mut counter: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM categories c");
        push_name_filter(&mut counter, name);
        let total: i64 = counter
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(ITEM_SELECT);
        push_name_filter(&mut builder, name);
        let items = self.fetch_items(builder, Some(request)).await?;

        Ok(PagedList::new(items, request, u64_count(total)))
    }

    async fn slug_exists(&self, slug: &Slug, exclude: Option<CategoryId>) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM categories WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(slug.as_str())
        .bind(exclude.map(i64::from))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (name, slug, description, show_on_menu)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, slug, description, show_on_menu",
        )
        .bind(category.name)
        .bind(category.slug.into_inner())
        .bind(category.description)
        .bind(category.show_on_menu)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Category::try_from(row)
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<Option<Category>> {
        sqlx::query_as::<_, CategoryRow>(
            "UPDATE categories SET name = $2, slug = $3, description = $4, show_on_menu = $5
             WHERE id = $1
             RETURNING id, name, slug, description, show_on_menu",
        )
        .bind(i64::from(update.id))
        .bind(update.name)
        .bind(update.slug.into_inner())
        .bind(update.description)
        .bind(update.show_on_menu)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .map(Category::try_from)
        .transpose()
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<bool> {
        // posts.category_id is ON DELETE SET NULL
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn toggle_show_on_menu(&self, id: CategoryId) -> DomainResult<Option<bool>> {
        sqlx::query_scalar::<_, bool>(
            "UPDATE categories SET show_on_menu = NOT show_on_menu WHERE id = $1 RETURNING show_on_menu",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)
    }
}
