// src/infrastructure/repositories/postgres/tags.rs
use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::post_filter_sql::escape_like;
use super::{push_limit_offset, u64_count};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::{PageRequest, PagedList};
use crate::domain::tag::{NewTag, Tag, TagItem, TagRepository, TagUpdate};
use crate::domain::value_objects::{Slug, TagId};
use crate::infrastructure::repositories::map_sqlx;

#[derive(Clone)]
pub struct PostgresTagRepository {
    pool: PgPool,
}

impl PostgresTagRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TagRow {
    id: i64,
    name: String,
    slug: String,
    description: String,
}

impl TryFrom<TagRow> for Tag {
    type Error = DomainError;

    fn try_from(row: TagRow) -> Result<Self, Self::Error> {
        Ok(Tag {
            id: TagId::new(row.id)?,
            name: row.name,
            slug: Slug::new(row.slug)?,
            description: row.description,
        })
    }
}

#[derive(Debug, FromRow)]
struct TagItemRow {
    #[sqlx(flatten)]
    tag: TagRow,
    post_count: i64,
}

impl PostgresTagRepository {
    /// Tags by name with their published post counts.
    async fn items(
        &self,
        name: Option<&str>,
        request: Option<PageRequest>,
    ) -> DomainResult<Vec<TagItem>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT t.id, t.name, t.slug, t.description,
                    COUNT(p.id) FILTER (WHERE p.published) AS post_count
             FROM tags t
             LEFT JOIN post_tags pt ON pt.tag_id = t.id
             LEFT JOIN posts p ON p.id = pt.post_id",
        );
        push_name_filter(&mut builder, name);
        builder.push(" GROUP BY t.id ORDER BY LOWER(t.name), t.id");
        if let Some(request) = request {
            push_limit_offset(&mut builder, request);
        }

        builder
            .build_query_as::<TagItemRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(|row| {
                Ok(TagItem {
                    tag: row.tag.try_into()?,
                    post_count: row.post_count,
                })
            })
            .collect()
    }
}

fn push_name_filter(builder: &mut QueryBuilder<'_, Postgres>, name: Option<&str>) {
    if let Some(name) = name {
        builder
            .push(" WHERE t.name ILIKE ")
            .push_bind(format!("%{}%", escape_like(name)))
            .push(" ESCAPE '\\'");
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_id(&self, id: TagId) -> DomainResult<Option<Tag>> {
        sqlx::query_as::<_, TagRow>("SELECT id, name, slug, description FROM tags WHERE id = $1")
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Tag::try_from)
            .transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Tag>> {
        sqlx::query_as::<_, TagRow>("SELECT id, name, slug, description FROM tags WHERE slug = $1")
            .bind(slug.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .map(Tag::try_from)
            .transpose()
    }

    async fn list(&self) -> DomainResult<Vec<TagItem>> {
        self.items(None, None).await
    }

    async fn page(
        &self,
        name: Option<&str>,
        request: PageRequest,
    ) -> DomainResult<PagedList<TagItem>> {
        let mut counter: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM tags t");
        push_name_filter(&mut counter, name);
        let total: i64 = counter
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let items = self.items(name, Some(request)).await?;
        Ok(PagedList::new(items, request, u64_count(total)))
    }

    async fn slug_exists(&self, slug: &Slug, exclude: Option<TagId>) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM tags WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(slug.as_str())
        .bind(exclude.map(i64::from))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn insert(&self, tag: NewTag) -> DomainResult<Tag> {
        let row = sqlx::query_as::<_, TagRow>(
            "INSERT INTO tags (name, slug, description) VALUES ($1, $2, $3)
             RETURNING id, name, slug, description",
        )
        .bind(tag.name)
        .bind(tag.slug.into_inner())
        .bind(tag.description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Tag::try_from(row)
    }

    async fn update(&self, update: TagUpdate) -> DomainResult<Option<Tag>> {
        sqlx::query_as::<_, TagRow>(
            "UPDATE tags SET name = $2, slug = $3, description = $4
             WHERE id = $1
             RETURNING id, name, slug, description",
        )
        .bind(i64::from(update.id))
        .bind(update.name)
        .bind(update.slug.into_inner())
        .bind(update.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .map(Tag::try_from)
        .transpose()
    }

    async fn delete(&self, id: TagId) -> DomainResult<bool> {
        // post_tags rows cascade
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }
}
