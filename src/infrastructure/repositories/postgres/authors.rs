// src/infrastructure/repositories/postgres/authors.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::post_filter_sql::escape_like;
use super::{push_limit_offset, u64_count};
use crate::domain::author::{Author, AuthorItem, AuthorRepository, AuthorUpdate, NewAuthor};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::{PageRequest, PagedList};
use crate::domain::value_objects::{AuthorId, Email, Slug};
use crate::infrastructure::repositories::map_sqlx;

const AUTHOR_COLUMNS: &str = "id, full_name, email, slug, joined_date, image_url, notes";

#[derive(Clone)]
pub struct PostgresAuthorRepository {
    pool: PgPool,
}

impl PostgresAuthorRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuthorRow {
    id: i64,
    full_name: String,
    email: String,
    slug: String,
    joined_date: DateTime<Utc>,
    image_url: Option<String>,
    notes: Option<String>,
}

impl TryFrom<AuthorRow> for Author {
    type Error = DomainError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        Ok(Author {
            id: AuthorId::new(row.id)?,
            full_name: row.full_name,
            email: Email::new(row.email)?,
            slug: Slug::new(row.slug)?,
            joined_date: row.joined_date,
            image_url: row.image_url,
            notes: row.notes,
        })
    }
}

#[derive(Debug, FromRow)]
struct AuthorItemRow {
    #[sqlx(flatten)]
    author: AuthorRow,
    post_count: i64,
}

enum ItemOrder {
    Name,
    PostCount,
}

impl PostgresAuthorRepository {
    async fn items(
        &self,
        name: Option<&str>,
        order: ItemOrder,
        request: Option<PageRequest>,
    ) -> DomainResult<Vec<AuthorItem>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT a.id, a.full_name, a.email, a.slug, a.joined_date, a.image_url, a.notes,
                    COUNT(p.id) AS post_count
             FROM authors a
             LEFT JOIN posts p ON p.author_id = a.id AND p.published",
        );
        push_name_filter(&mut builder, name);
        builder.push(" GROUP BY a.id");
        builder.push(match order {
            ItemOrder::Name => " ORDER BY LOWER(a.full_name), a.id",
            ItemOrder::PostCount => " ORDER BY post_count DESC, LOWER(a.full_name), a.id",
        });
        if let Some(request) = request {
            push_limit_offset(&mut builder, request);
        }

        builder
            .build_query_as::<AuthorItemRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?
            .into_iter()
            .map(|row| {
                Ok(AuthorItem {
                    author: row.author.try_into()?,
                    post_count: row.post_count,
                })
            })
            .collect()
    }
}

fn push_name_filter(builder: &mut QueryBuilder<'_, Postgres>, name: Option<&str>) {
    if let Some(name) = name {
        builder
            .push(" WHERE a.full_name ILIKE ")
            .push_bind(format!("%{}%", escape_like(name)))
            .push(" ESCAPE '\\'");
    }
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn find_by_id(&self, id: AuthorId) -> DomainResult<Option<Author>> {
        sqlx::query_as::<_, AuthorRow>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .map(Author::try_from)
        .transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Author>> {
        sqlx::query_as::<_, AuthorRow>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE slug = $1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .map(Author::try_from)
        .transpose()
    }

    async fn list(&self) -> DomainResult<Vec<AuthorItem>> {
        self.items(None, ItemOrder::Name, None).await
    }

    async fn page(
        &self,
        name: Option<&str>,
        request: PageRequest,
    ) -> DomainResult<PagedList<AuthorItem>> {
        let mut counter: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM authors a");
        push_name_filter(&mut counter, name);
        let total: i64 = counter
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let items = self
            .items(name, ItemOrder::Name, Some(request))
            .await?;
        Ok(PagedList::new(items, request, u64_count(total)))
    }

    async fn popular(&self, limit: u32) -> DomainResult<Vec<AuthorItem>> {
        let top = PageRequest::new(1, i64::from(limit));
        self.items(None, ItemOrder::PostCount, Some(top)).await
    }

    async fn slug_exists(&self, slug: &Slug, exclude: Option<AuthorId>) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM authors WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(slug.as_str())
        .bind(exclude.map(i64::from))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn insert(&self, author: NewAuthor) -> DomainResult<Author> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            "INSERT INTO authors (full_name, email, slug, joined_date, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {AUTHOR_COLUMNS}"
        ))
        .bind(author.full_name)
        .bind(String::from(author.email))
        .bind(author.slug.into_inner())
        .bind(author.joined_date)
        .bind(author.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Author::try_from(row)
    }

    async fn update(&self, update: AuthorUpdate) -> DomainResult<Option<Author>> {
        sqlx::query_as::<_, AuthorRow>(&format!(
            "UPDATE authors SET full_name = $2, email = $3, slug = $4, joined_date = $5, notes = $6
             WHERE id = $1
             RETURNING {AUTHOR_COLUMNS}"
        ))
        .bind(i64::from(update.id))
        .bind(update.full_name)
        .bind(String::from(update.email))
        .bind(update.slug.into_inner())
        .bind(update.joined_date)
        .bind(update.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .map(Author::try_from)
        .transpose()
    }

    async fn delete(&self, id: AuthorId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(|err| match map_sqlx(err) {
                // posts.author_id is ON DELETE RESTRICT
                DomainError::NotFound(_) => {
                    DomainError::Conflict(format!("author {id} still owns posts"))
                }
                other => other,
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_image_url(&self, id: AuthorId, image_url: Option<String>) -> DomainResult<bool> {
        let result = sqlx::query("UPDATE authors SET image_url = $2 WHERE id = $1")
            .bind(i64::from(id))
            .bind(image_url)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }
}
