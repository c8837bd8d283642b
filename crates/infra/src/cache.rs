//! Shared catalog cache.
//!
//! Catalogs are read-only after parsing, so one `Arc<Catalog>` per category is
//! handed to every session that picks that category.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use carconfig_catalog::Catalog;

#[derive(Debug, Clone)]
pub struct CachedCatalog {
    pub catalog: Arc<Catalog>,
    pub loaded_at: DateTime<Utc>,
}

/// Category-keyed catalog cache.
pub trait CatalogCache: Send + Sync {
    fn get(&self, category: &str) -> Option<CachedCatalog>;
    fn insert(&self, category: &str, catalog: Arc<Catalog>) -> CachedCatalog;
    fn invalidate(&self, category: &str);
    fn clear(&self);
}

impl<C> CatalogCache for Arc<C>
where
    C: CatalogCache + ?Sized,
{
    fn get(&self, category: &str) -> Option<CachedCatalog> {
        (**self).get(category)
    }

    fn insert(&self, category: &str, catalog: Arc<Catalog>) -> CachedCatalog {
        (**self).insert(category, catalog)
    }

    fn invalidate(&self, category: &str) {
        (**self).invalidate(category)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// In-memory cache, shared across sessions of one process.
#[derive(Debug, Default)]
pub struct InMemoryCatalogCache {
    inner: RwLock<HashMap<String, CachedCatalog>>,
}

impl InMemoryCatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CatalogCache for InMemoryCatalogCache {
    fn get(&self, category: &str) -> Option<CachedCatalog> {
        let map = self.inner.read().ok()?;
        map.get(category).cloned()
    }

    fn insert(&self, category: &str, catalog: Arc<Catalog>) -> CachedCatalog {
        let entry = CachedCatalog {
            catalog,
            loaded_at: Utc::now(),
        };
        if let Ok(mut map) = self.inner.write() {
            map.insert(category.to_string(), entry.clone());
        }
        entry
    }

    fn invalidate(&self, category: &str) {
        if let Ok(mut map) = self.inner.write() {
            map.remove(category);
        }
    }

    fn clear(&self) {
        if let Ok(mut map) = self.inner.write() {
            map.clear();
        }
    }
}

/// Cache that never holds anything; every load goes to the source.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCatalogCache;

impl CatalogCache for NoCatalogCache {
    fn get(&self, _category: &str) -> Option<CachedCatalog> {
        None
    }

    fn insert(&self, _category: &str, catalog: Arc<Catalog>) -> CachedCatalog {
        CachedCatalog {
            catalog,
            loaded_at: Utc::now(),
        }
    }

    fn invalidate(&self, _category: &str) {}

    fn clear(&self) {}
}
