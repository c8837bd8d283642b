//! Catalog retrieval: resolve a category to its raw catalog document.
//!
//! Sources only move text; parsing happens in the loader so every source gets
//! the same all-or-nothing validation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use thiserror::Error;

/// Catalog source error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("no catalog for category '{0}'")]
    NotFound(String),
    #[error("invalid category name '{0}'")]
    InvalidCategory(String),
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

/// Async retrieval of one category's catalog document.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self, category: &str) -> Result<String, SourceError>;
}

/// Reads `{root}/{category}.json`.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    root: PathBuf,
}

impl FileCatalogSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Category names are single path components; anything that could escape
    /// `root` is refused.
    pub fn path_for(&self, category: &str) -> Result<PathBuf, SourceError> {
        let escapes = category.is_empty()
            || category.starts_with('.')
            || category.contains(['/', '\\', '\0']);
        if escapes {
            return Err(SourceError::InvalidCategory(category.to_string()));
        }
        Ok(self.root.join(format!("{category}.json")))
    }
}

#[async_trait::async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self, category: &str) -> Result<String, SourceError> {
        let path = self.path_for(category)?;
        tracing::debug!(path = %path.display(), "reading catalog file");

        tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(category.to_string())
            } else {
                SourceError::Io {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })
    }
}

/// In-memory catalog documents for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCatalogSource {
    payloads: RwLock<HashMap<String, String>>,
}

impl InMemoryCatalogSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, category: impl Into<String>, payload: impl Into<String>) -> Self {
        self.insert(category, payload);
        self
    }

    pub fn insert(&self, category: impl Into<String>, payload: impl Into<String>) {
        if let Ok(mut map) = self.payloads.write() {
            map.insert(category.into(), payload.into());
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn fetch(&self, category: &str) -> Result<String, SourceError> {
        let map = self.payloads.read().map_err(|_| SourceError::Io {
            path: format!("memory:{category}"),
            message: "lock poisoned".to_string(),
        })?;
        map.get(category)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(category.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_source_reads_category_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("EV.json"), r#"{ "Ioniq 5": {} }"#).unwrap();

        let source = FileCatalogSource::new(dir.path());
        assert_eq!(source.fetch("EV").await.unwrap(), r#"{ "Ioniq 5": {} }"#);
        assert_eq!(
            source.fetch("PBV").await,
            Err(SourceError::NotFound("PBV".to_string()))
        );
    }

    #[tokio::test]
    async fn file_source_accepts_non_ascii_categories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("승용.json"), "{}").unwrap();

        let source = FileCatalogSource::new(dir.path());
        assert_eq!(source.fetch("승용").await.unwrap(), "{}");
    }

    #[test]
    fn file_source_refuses_path_escapes() {
        let source = FileCatalogSource::new("/srv/catalogs");
        for bad in ["", "../etc/passwd", "a/b", "a\\b", ".hidden"] {
            assert_eq!(
                source.path_for(bad),
                Err(SourceError::InvalidCategory(bad.to_string()))
            );
        }
        assert_eq!(
            source.path_for("RV").unwrap(),
            PathBuf::from("/srv/catalogs/RV.json")
        );
    }

    #[tokio::test]
    async fn in_memory_source_serves_inserted_payloads() {
        let source = InMemoryCatalogSource::new().with("RV", "{}");
        assert_eq!(source.fetch("RV").await.unwrap(), "{}");
        assert!(matches!(source.fetch("EV").await, Err(SourceError::NotFound(_))));
    }
}
