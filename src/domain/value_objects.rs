// src/domain/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> DomainResult<Self> {
                if id <= 0 {
                    Err(DomainError::Validation(
                        concat!($label, " id must be positive").into(),
                    ))
                } else {
                    Ok(Self(id))
                }
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(PostId, "post");
entity_id!(CategoryId, "category");
entity_id!(TagId, "tag");
entity_id!(AuthorId, "author");

pub const MAX_SLUG_LEN: usize = 200;

/// URL-safe alternate key. Lowercase ascii letters, digits, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let value = value.trim();
        if value.is_empty() {
            return Err(DomainError::Validation("slug cannot be empty".into()));
        }
        if value.len() > MAX_SLUG_LEN {
            return Err(DomainError::Validation(format!(
                "slug must be at most {MAX_SLUG_LEN} characters"
            )));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(DomainError::Validation(
                "slug may only contain lowercase letters, digits, '-' and '_'".into(),
            ));
        }
        Ok(Self(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Slug {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

/// Trims `value` and checks it is present and no longer than `max` characters.
pub fn required_text(field: &str, value: impl Into<String>, max: usize) -> DomainResult<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{field} cannot be empty")));
    }
    ensure_max_len(field, trimmed, max)?;
    Ok(trimmed.to_string())
}

/// Like [`required_text`], but blank input becomes `None`.
pub fn optional_text(
    field: &str,
    value: Option<String>,
    max: usize,
) -> DomainResult<Option<String>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => {
            ensure_max_len(field, trimmed, max)?;
            Ok(Some(trimmed.to_string()))
        }
    }
}

fn ensure_max_len(field: &str, value: &str, max: usize) -> DomainResult<()> {
    if value.chars().count() > max {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = required_text("email", value, 100)?;
        match value.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(Self(value)),
            _ => Err(DomainError::Validation("email is not valid".into())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_accepts_url_safe_values() {
        let slug = Slug::new("  rust-2024_notes ").unwrap();
        assert_eq!(slug.as_str(), "rust-2024_notes");
    }

    #[test]
    fn slug_rejects_uppercase_and_spaces() {
        assert!(Slug::new("Hello").is_err());
        assert!(Slug::new("hello world").is_err());
        assert!(Slug::new("   ").is_err());
    }

    #[test]
    fn ids_must_be_positive() {
        assert!(PostId::new(0).is_err());
        assert!(TagId::new(-3).is_err());
        assert_eq!(i64::from(AuthorId::new(7).unwrap()), 7);
    }

    #[test]
    fn optional_text_drops_blank_values() {
        assert_eq!(optional_text("meta", Some("  ".into()), 10).unwrap(), None);
        assert!(optional_text("meta", Some("x".repeat(11)), 10).is_err());
    }

    #[test]
    fn email_requires_at_sign() {
        assert!(Email::new("writer@example.com").is_ok());
        assert!(Email::new("writer.example.com").is_err());
        assert!(Email::new("@example.com").is_err());
    }
}
