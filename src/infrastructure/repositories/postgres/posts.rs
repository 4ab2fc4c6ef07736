// src/infrastructure/repositories/postgres/posts.rs
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};

use super::post_filter_sql::{POST_FROM, push_filters, push_ordering};
use super::{push_limit_offset, u64_count};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::{PageRequest, PagedList};
use crate::domain::post::{
    AuthorRef, CategoryRef, MonthlyPostCount, NewPost, Post, PostOrdering, PostQuery,
    PostReadRepository, PostUpdate, PostWriteRepository, TagLabel, TagRef,
};
use crate::domain::value_objects::{AuthorId, CategoryId, PostId, Slug, TagId};
use crate::infrastructure::repositories::map_sqlx;

const POST_COLUMNS: &str = "SELECT p.id, p.title, p.short_description, p.description, p.slug,
            p.meta, p.image_url, p.view_count, p.published, p.posted_date, p.modified_date,
            a.id AS author_id, a.full_name AS author_name, a.slug AS author_slug,
            c.id AS category_id, c.name AS category_name, c.slug AS category_slug";

#[derive(Clone)]
pub struct PostgresPostWriteRepository {
    pool: PgPool,
    reader: PostgresPostReadRepository,
}

impl PostgresPostWriteRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            reader: PostgresPostReadRepository::new(pool.clone()),
            pool,
        }
    }
}

#[derive(Clone)]
pub struct PostgresPostReadRepository {
    pool: PgPool,
}

impl PostgresPostReadRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    short_description: String,
    description: String,
    slug: String,
    meta: String,
    image_url: Option<String>,
    view_count: i64,
    published: bool,
    posted_date: DateTime<Utc>,
    modified_date: Option<DateTime<Utc>>,
    author_id: i64,
    author_name: String,
    author_slug: String,
    category_id: Option<i64>,
    category_name: Option<String>,
    category_slug: Option<String>,
}

#[derive(Debug, FromRow)]
struct PostTagRow {
    post_id: i64,
    id: i64,
    name: String,
    slug: String,
}

#[derive(Debug, FromRow)]
struct ArchiveRow {
    year: i32,
    month: i32,
    post_count: i64,
}

impl PostRow {
    fn into_post(self, tags: Vec<TagRef>) -> DomainResult<Post> {
        let category = match (self.category_id, self.category_name, self.category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(CategoryRef {
                id: CategoryId::new(id)?,
                name,
                slug: Slug::new(slug)?,
            }),
            _ => None,
        };
        Ok(Post {
            id: PostId::new(self.id)?,
            title: self.title,
            short_description: self.short_description,
            description: self.description,
            slug: Slug::new(self.slug)?,
            meta: self.meta,
            image_url: self.image_url,
            view_count: self.view_count,
            published: self.published,
            posted_date: self.posted_date,
            modified_date: self.modified_date,
            author: AuthorRef {
                id: AuthorId::new(self.author_id)?,
                full_name: self.author_name,
                slug: Slug::new(self.author_slug)?,
            },
            category,
            tags,
        })
    }
}

impl PostgresPostReadRepository {
    fn select() -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(POST_COLUMNS);
        builder.push(POST_FROM);
        builder
    }

    async fn fetch(&self, mut builder: QueryBuilder<'_, Postgres>) -> DomainResult<Vec<Post>> {
        let rows = builder
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        self.with_tags(rows).await
    }

    async fn fetch_optional(
        &self,
        builder: QueryBuilder<'_, Postgres>,
    ) -> DomainResult<Option<Post>> {
        Ok(self.fetch(builder).await?.into_iter().next())
    }

    /// Loads the tags of every row in one round trip.
    async fn with_tags(&self, rows: Vec<PostRow>) -> DomainResult<Vec<Post>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let tag_rows = sqlx::query_as::<_, PostTagRow>(
            "SELECT pt.post_id, t.id, t.name, t.slug
             FROM post_tags pt JOIN tags t ON t.id = pt.tag_id
             WHERE pt.post_id = ANY($1)
             ORDER BY LOWER(t.name), t.id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let mut tags: HashMap<i64, Vec<TagRef>> = HashMap::new();
        for row in tag_rows {
            tags.entry(row.post_id).or_default().push(TagRef {
                id: TagId::new(row.id)?,
                name: row.name,
                slug: Slug::new(row.slug)?,
            });
        }

        rows.into_iter()
            .map(|row| {
                let post_tags = tags.remove(&row.id).unwrap_or_default();
                row.into_post(post_tags)
            })
            .collect()
    }
}

#[async_trait]
impl PostReadRepository for PostgresPostReadRepository {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        let mut builder = Self::select();
        builder.push(" WHERE p.id = ").push_bind(i64::from(id));
        self.fetch_optional(builder).await
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Post>> {
        let mut builder = Self::select();
        builder.push(" WHERE p.slug = ").push_bind(slug.as_str().to_owned());
        self.fetch_optional(builder).await
    }

    async fn find_by_posted_slug(
        &self,
        year: i32,
        month: u32,
        slug: &Slug,
    ) -> DomainResult<Option<Post>> {
        let query = PostQuery::new()
            .with_year(year)
            .with_month(month)
            .with_post_slug(slug.as_str());
        let mut builder = Self::select();
        push_filters(&mut builder, query.filters());
        self.fetch_optional(builder).await
    }

    async fn find_one(&self, query: &PostQuery) -> DomainResult<Option<Post>> {
        let mut builder = Self::select();
        push_filters(&mut builder, query.filters());
        push_ordering(&mut builder, PostOrdering::default());
        builder.push(" LIMIT 1");
        self.fetch_optional(builder).await
    }

    async fn list(&self, query: &PostQuery, ordering: PostOrdering) -> DomainResult<Vec<Post>> {
        let mut builder = Self::select();
        push_filters(&mut builder, query.filters());
        push_ordering(&mut builder, ordering);
        self.fetch(builder).await
    }

    async fn count(&self, query: &PostQuery) -> DomainResult<u64> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*)");
        builder.push(POST_FROM);
        push_filters(&mut builder, query.filters());
        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(u64_count(count))
    }

    /// The count and the slice are separate read-committed statements, so a
    /// write landing between them can leave `total_count` one page behind the
    /// items. Callers treat the totals as advisory.
    async fn page(
        &self,
        query: &PostQuery,
        request: PageRequest,
        ordering: PostOrdering,
    ) -> DomainResult<PagedList<Post>> {
        let total = self.count(query).await?;
        if total <= request.offset() {
            return Ok(PagedList::new(Vec::new(), request, total));
        }

        let mut builder = Self::select();
        push_filters(&mut builder, query.filters());
        push_ordering(&mut builder, ordering);
        push_limit_offset(&mut builder, request);
        let items = self.fetch(builder).await?;
        Ok(PagedList::new(items, request, total))
    }

    async fn slug_exists(&self, slug: &Slug, exclude: Option<PostId>) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM posts WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(slug.as_str())
        .bind(exclude.map(i64::from))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn popular(&self, limit: u32) -> DomainResult<Vec<Post>> {
        let mut builder = Self::select();
        push_filters(&mut builder, PostQuery::new().published_only().filters());
        push_ordering(&mut builder, PostOrdering::most_viewed());
        builder.push(" LIMIT ").push_bind(i64::from(limit));
        self.fetch(builder).await
    }

    async fn random(&self, limit: u32) -> DomainResult<Vec<Post>> {
        let mut builder = Self::select();
        push_filters(&mut builder, PostQuery::new().published_only().filters());
        builder
            .push(" ORDER BY random() LIMIT ")
            .push_bind(i64::from(limit));
        self.fetch(builder).await
    }

    async fn archives(&self, months: u32) -> DomainResult<Vec<MonthlyPostCount>> {
        let rows = sqlx::query_as::<_, ArchiveRow>(
            "SELECT EXTRACT(YEAR FROM posted_date AT TIME ZONE 'UTC')::int AS year,
                    EXTRACT(MONTH FROM posted_date AT TIME ZONE 'UTC')::int AS month,
                    COUNT(*) AS post_count
             FROM posts
             WHERE published
             GROUP BY 1, 2
             ORDER BY 1 DESC, 2 DESC
             LIMIT $1",
        )
        .bind(i64::from(months))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|row| {
                let month = u32::try_from(row.month)
                    .map_err(|_| DomainError::persistence("invalid archive month"))?;
                Ok(MonthlyPostCount {
                    year: row.year,
                    month,
                    post_count: row.post_count,
                })
            })
            .collect()
    }
}

/// Replaces the tag set of `post_id`, creating tags that do not exist yet.
async fn replace_tags(
    tx: &mut Transaction<'_, Postgres>,
    post_id: i64,
    labels: Vec<TagLabel>,
) -> DomainResult<()> {
    sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
        .bind(post_id)
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx)?;

    for label in labels {
        let tag_id: i64 = sqlx::query_scalar(
            "INSERT INTO tags (name, slug) VALUES ($1, $2)
             ON CONFLICT (slug) DO UPDATE SET slug = EXCLUDED.slug
             RETURNING id",
        )
        .bind(&label.name)
        .bind(label.slug.as_str())
        .fetch_one(&mut **tx)
        .await
        .map_err(map_sqlx)?;

        sqlx::query("INSERT INTO post_tags (post_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(post_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx)?;
    }
    Ok(())
}

impl PostgresPostWriteRepository {
    async fn reload(&self, id: i64) -> DomainResult<Post> {
        let id = PostId::new(id)?;
        self.reader
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::persistence(format!("post {id} vanished after write")))
    }
}

#[async_trait]
impl PostWriteRepository for PostgresPostWriteRepository {
    async fn insert(&self, post: NewPost) -> DomainResult<Post> {
        let NewPost {
            title,
            short_description,
            description,
            slug,
            meta,
            image_url,
            published,
            posted_date,
            author_id,
            category_id,
            tags,
        } = post;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (title, short_description, description, slug, meta, image_url,
                                published, posted_date, author_id, category_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING id",
        )
        .bind(title)
        .bind(short_description)
        .bind(description)
        .bind(slug.into_inner())
        .bind(meta)
        .bind(image_url)
        .bind(published)
        .bind(posted_date)
        .bind(i64::from(author_id))
        .bind(category_id.map(i64::from))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        replace_tags(&mut tx, id, tags).await?;
        tx.commit().await.map_err(map_sqlx)?;

        self.reload(id).await
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<Option<Post>> {
        let PostUpdate {
            id,
            title,
            short_description,
            description,
            slug,
            meta,
            published,
            author_id,
            category_id,
            tags,
            modified_date,
        } = update;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let result = sqlx::query(
            "UPDATE posts
             SET title = $2, short_description = $3, description = $4, slug = $5, meta = $6,
                 published = $7, author_id = $8, category_id = $9, modified_date = $10
             WHERE id = $1",
        )
        .bind(i64::from(id))
        .bind(title)
        .bind(short_description)
        .bind(description)
        .bind(slug.into_inner())
        .bind(meta)
        .bind(published)
        .bind(i64::from(author_id))
        .bind(category_id.map(i64::from))
        .bind(modified_date)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        replace_tags(&mut tx, i64::from(id), tags).await?;
        tx.commit().await.map_err(map_sqlx)?;

        self.reload(i64::from(id)).await.map(Some)
    }

    async fn delete(&self, id: PostId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn toggle_published(
        &self,
        id: PostId,
        modified_at: DateTime<Utc>,
    ) -> DomainResult<Option<bool>> {
        sqlx::query_scalar::<_, bool>(
            "UPDATE posts SET published = NOT published, modified_date = $2
             WHERE id = $1
             RETURNING published",
        )
        .bind(i64::from(id))
        .bind(modified_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn increment_view_count(&self, id: PostId) -> DomainResult<bool> {
        let result = sqlx::query("UPDATE posts SET view_count = view_count + 1 WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_image_url(&self, id: PostId, image_url: Option<String>) -> DomainResult<bool> {
        let result = sqlx::query("UPDATE posts SET image_url = $2 WHERE id = $1")
            .bind(i64::from(id))
            .bind(image_url)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }
}
