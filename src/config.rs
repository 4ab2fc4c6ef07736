// src/config.rs
use std::{env, path::PathBuf, str::FromStr, time::Duration};
use thiserror::Error;

use crate::application::cache::DEFAULT_CACHE_TTL;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: Option<String>,
    listen_addr: String,
    storage_backend: StorageBackend,
    database_max_connections: u32,
    cache_backend: CacheBackend,
    redis_url: Option<String>,
    cache_ttl: Duration,
    media_root: PathBuf,
    media_public_url: String,
    max_upload_bytes: usize,
    allowed_origins: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::Invalid(format!(
                "STORAGE_BACKEND must be 'postgres' or 'memory', got '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheBackend {
    Memory,
    Redis,
}

impl FromStr for CacheBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            other => Err(ConfigError::Invalid(format!(
                "CACHE_BACKEND must be 'memory' or 'redis', got '{other}'"
            ))),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".into()
}

fn default_max_connections() -> u32 {
    10
}

fn default_max_upload_bytes() -> usize {
    5 * 1024 * 1024
}

impl AppConfig {
    /// Build configuration from environment variables. Uses defaults for
    /// optional values and validates the ones that are present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let storage_backend = value("STORAGE_BACKEND")
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or(StorageBackend::Postgres);
        let database_url = value("DATABASE_URL");
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let cache_backend = value("CACHE_BACKEND")
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or(CacheBackend::Memory);
        let redis_url = value("REDIS_URL");
        if cache_backend == CacheBackend::Redis && redis_url.is_none() {
            return Err(ConfigError::Missing("REDIS_URL"));
        }

        let database_max_connections = parse_number(
            "DATABASE_MAX_CONNECTIONS",
            value("DATABASE_MAX_CONNECTIONS"),
        )?
        .unwrap_or_else(default_max_connections);
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "DATABASE_MAX_CONNECTIONS must be at least 1".into(),
            ));
        }

        let cache_ttl = parse_number::<u64>("CACHE_TTL_SECONDS", value("CACHE_TTL_SECONDS"))?
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CACHE_TTL);
        if cache_ttl.is_zero() {
            return Err(ConfigError::Invalid(
                "CACHE_TTL_SECONDS must be at least 1".into(),
            ));
        }

        let max_upload_bytes = parse_number("MAX_UPLOAD_BYTES", value("MAX_UPLOAD_BYTES"))?
            .unwrap_or_else(default_max_upload_bytes);

        let allowed_origins = value("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url,
            listen_addr: value("LISTEN_ADDR").unwrap_or_else(default_listen_addr),
            storage_backend,
            database_max_connections,
            cache_backend,
            redis_url,
            cache_ttl,
            media_root: value("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uploads")),
            media_public_url: value("MEDIA_PUBLIC_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "/media".into()),
            max_upload_bytes,
            allowed_origins,
        })
    }

    /// Present whenever the storage backend is Postgres.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    #[must_use]
    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    #[must_use]
    pub const fn storage_backend(&self) -> StorageBackend {
        self.storage_backend
    }

    #[must_use]
    pub const fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    #[must_use]
    pub const fn cache_backend(&self) -> CacheBackend {
        self.cache_backend
    }

    #[must_use]
    pub fn redis_url(&self) -> Option<&str> {
        self.redis_url.as_deref()
    }

    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    #[must_use]
    pub const fn media_root(&self) -> &PathBuf {
        &self.media_root
    }

    #[must_use]
    pub fn media_public_url(&self) -> &str {
        &self.media_public_url
    }

    #[must_use]
    pub const fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Empty means any origin is allowed.
    #[must_use]
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }
}

fn parse_number<T: FromStr>(key: &str, raw: Option<String>) -> Result<Option<T>, ConfigError> {
    raw.map(|v| {
        v.parse::<T>()
            .map_err(|_| ConfigError::Invalid(format!("{key} must be a number, got '{v}'")))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn memory_backend_needs_no_database() {
        let cfg = config(&[("STORAGE_BACKEND", "memory")]).unwrap();
        assert_eq!(cfg.storage_backend(), StorageBackend::Memory);
        assert_eq!(cfg.cache_backend(), CacheBackend::Memory);
        assert_eq!(cfg.cache_ttl(), DEFAULT_CACHE_TTL);
        assert_eq!(cfg.media_public_url(), "/media");
        assert!(cfg.allowed_origins().is_empty());
    }

    #[test]
    fn postgres_requires_database_url() {
        assert!(matches!(
            config(&[]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/blog")]).unwrap();
        assert_eq!(cfg.database_url(), Some("postgres://localhost/blog"));
    }

    #[test]
    fn redis_cache_requires_url() {
        let result = config(&[("STORAGE_BACKEND", "memory"), ("CACHE_BACKEND", "redis")]);
        assert!(matches!(result, Err(ConfigError::Missing("REDIS_URL"))));
    }

    #[test]
    fn rejects_malformed_numbers() {
        let result = config(&[("STORAGE_BACKEND", "memory"), ("CACHE_TTL_SECONDS", "soon")]);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        let result = config(&[("STORAGE_BACKEND", "memory"), ("CACHE_TTL_SECONDS", "0")]);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn parses_origins_and_trims_media_url() {
        let cfg = config(&[
            ("STORAGE_BACKEND", "memory"),
            ("ALLOWED_ORIGINS", "http://a.test, ,http://b.test"),
            ("MEDIA_PUBLIC_URL", "/files/"),
        ])
        .unwrap();
        assert_eq!(cfg.allowed_origins(), ["http://a.test", "http://b.test"]);
        assert_eq!(cfg.media_public_url(), "/files");
    }
}
