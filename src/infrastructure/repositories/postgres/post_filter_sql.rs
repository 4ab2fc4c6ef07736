// src/infrastructure/repositories/postgres/post_filter_sql.rs
//! SQL rendering of [`PostFilter`] clauses.
//!
//! The statements these fragments are appended to alias `posts` as `p`,
//! `authors` as `a` and the left-joined `categories` as `c`.

use crate::domain::post::{PostFilter, PostOrdering};
use sqlx::{Postgres, QueryBuilder};

pub(super) const POST_FROM: &str = " FROM posts p
     JOIN authors a ON a.id = p.author_id
     LEFT JOIN categories c ON c.id = p.category_id";

const TAG_EXISTS: &str =
    "EXISTS (SELECT 1 FROM post_tags pt JOIN tags t ON t.id = pt.tag_id WHERE pt.post_id = p.id AND ";

/// Appends ` WHERE <clause> AND <clause> ...`; nothing when `filters` is empty.
pub(super) fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: Vec<PostFilter>) {
    let mut separator = " WHERE ";
    for filter in filters {
        builder.push(separator);
        separator = " AND ";
        push_filter(builder, filter);
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: PostFilter) {
    match filter {
        PostFilter::AuthorId(id) => {
            builder.push("p.author_id = ").push_bind(id);
        }
        PostFilter::AuthorSlug(slug) => {
            builder.push("a.slug = ").push_bind(slug);
        }
        PostFilter::CategoryId(id) => {
            builder.push("p.category_id = ").push_bind(id);
        }
        PostFilter::CategorySlug(slug) => {
            builder.push("c.slug = ").push_bind(slug);
        }
        PostFilter::TagId(id) => {
            builder.push(TAG_EXISTS).push("t.id = ").push_bind(id).push(")");
        }
        PostFilter::TagSlug(slug) => {
            builder.push(TAG_EXISTS).push("t.slug = ").push_bind(slug).push(")");
        }
        PostFilter::PostedYear(year) => {
            builder
                .push("EXTRACT(YEAR FROM p.posted_date AT TIME ZONE 'UTC')::int = ")
                .push_bind(year);
        }
        PostFilter::PostedMonth(month) => {
            builder
                .push("EXTRACT(MONTH FROM p.posted_date AT TIME ZONE 'UTC')::int = ")
                .push_bind(date_part(month));
        }
        PostFilter::PostedDay(day) => {
            builder
                .push("EXTRACT(DAY FROM p.posted_date AT TIME ZONE 'UTC')::int = ")
                .push_bind(date_part(day));
        }
        PostFilter::PostId(id) => {
            builder.push("p.id = ").push_bind(id);
        }
        PostFilter::PostSlug(slug) => {
            builder.push("p.slug = ").push_bind(slug);
        }
        PostFilter::Published(flag) => {
            builder.push("p.published = ").push_bind(flag);
        }
        PostFilter::Keyword(keyword) => {
            let pattern = format!("%{}%", escape_like(&keyword));
            builder.push("(");
            for column in ["p.title", "p.short_description", "p.description", "c.name"] {
                builder
                    .push(column)
                    .push(" ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" ESCAPE '\\' OR ");
            }
            builder
                .push(TAG_EXISTS)
                .push("t.name ILIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\'))");
        }
    }
}

pub(super) fn push_ordering(builder: &mut QueryBuilder<'_, Postgres>, ordering: PostOrdering) {
    let direction = ordering.direction.as_sql();
    builder
        .push(" ORDER BY ")
        .push(ordering.key.sql_expr())
        .push(" ")
        .push(direction)
        .push(", p.id ")
        .push(direction);
}

fn date_part(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Escapes LIKE wildcards so user input only matches literally.
#[must_use]
pub(super) fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pagination::SortDirection;
    use crate::domain::post::{PostQuery, PostSortKey};

    fn render(query: &PostQuery) -> String {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT p.id");
        builder.push(POST_FROM);
        push_filters(&mut builder, query.filters());
        builder.sql().to_string()
    }

    #[test]
    fn unconstrained_query_has_no_where_clause() {
        assert!(!render(&PostQuery::new()).contains("WHERE"));
    }

    #[test]
    fn clauses_are_joined_with_and_and_bound() {
        let sql = render(
            &PostQuery::new()
                .with_category_slug("rust")
                .with_year(2024)
                .published_only(),
        );
        assert!(sql.contains(" WHERE c.slug = $1 AND EXTRACT(YEAR FROM"));
        assert!(sql.ends_with("AND p.published = $3"));
    }

    #[test]
    fn keyword_searches_text_category_and_tags() {
        let sql = render(&PostQuery::new().with_keyword("async"));
        for column in ["p.title", "p.short_description", "p.description", "c.name", "t.name"] {
            assert!(sql.contains(&format!("{column} ILIKE")), "missing {column}");
        }
        assert!(sql.contains("$5"));
    }

    #[test]
    fn ordering_breaks_ties_by_id() {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT 1");
        push_ordering(
            &mut builder,
            PostOrdering::new(PostSortKey::Title, SortDirection::Asc),
        );
        assert_eq!(builder.sql(), "SELECT 1 ORDER BY LOWER(p.title) ASC, p.id ASC");
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("100%_done\\"), "100\\%\\_done\\\\");
    }
}
