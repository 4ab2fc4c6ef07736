use crate::domain::errors::DomainError;

const CNT_POST_SLUG: &str = "posts_slug_key";
const CNT_CATEGORY_SLUG: &str = "categories_slug_key";
const CNT_TAG_SLUG: &str = "tags_slug_key";
const CNT_AUTHOR_SLUG: &str = "authors_slug_key";
const CNT_POST_AUTHOR: &str = "posts_author_id_fkey";
const CNT_POST_CATEGORY: &str = "posts_category_id_fkey";
const CNT_POST_VIEW_COUNT: &str = "posts_view_count_chk";

#[must_use]
pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_POST_SLUG | CNT_CATEGORY_SLUG | CNT_TAG_SLUG | CNT_AUTHOR_SLUG => {
                        DomainError::Conflict("slug already exists".into())
                    }
                    CNT_POST_AUTHOR => DomainError::NotFound("author not found".into()),
                    CNT_POST_CATEGORY => DomainError::NotFound("category not found".into()),
                    CNT_POST_VIEW_COUNT => {
                        DomainError::Validation("view count cannot be negative".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
