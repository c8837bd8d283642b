//! Catalog loading: cache, then source, then parse.

use std::sync::Arc;

use carconfig_catalog::Catalog;
use carconfig_core::{ConfiguratorError, ConfiguratorResult};

use crate::cache::CatalogCache;
use crate::source::CatalogSource;

#[derive(Clone)]
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    cache: Arc<dyn CatalogCache>,
}

impl core::fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CatalogLoader").finish_non_exhaustive()
    }
}

impl CatalogLoader {
    pub fn new(source: Arc<dyn CatalogSource>, cache: Arc<dyn CatalogCache>) -> Self {
        Self { source, cache }
    }

    /// Load the catalog for `category`.
    ///
    /// Retrieval failures and malformed documents both surface as
    /// `CatalogUnavailable`; a malformed document is never cached.
    pub async fn load(&self, category: &str) -> ConfiguratorResult<Arc<Catalog>> {
        if let Some(hit) = self.cache.get(category) {
            tracing::debug!(category, loaded_at = %hit.loaded_at, "catalog cache hit");
            return Ok(hit.catalog);
        }

        let text = self
            .source
            .fetch(category)
            .await
            .map_err(|e| ConfiguratorError::unavailable(category, e.to_string()))?;

        let catalog = Catalog::from_json_str(&text).map_err(|e| {
            tracing::warn!(category, error = %e, "catalog document rejected");
            ConfiguratorError::unavailable(category, e.to_string())
        })?;

        let entry = self.cache.insert(category, Arc::new(catalog));
        tracing::info!(category, models = entry.catalog.models().len(), "catalog loaded");
        Ok(entry.catalog)
    }

    /// Forget the cached catalog so the next load reads the source again.
    pub fn invalidate(&self, category: &str) {
        self.cache.invalidate(category);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{InMemoryCatalogCache, NoCatalogCache};
    use crate::source::InMemoryCatalogSource;

    const RV: &str = r#"{ "Palisade": { "Diesel 2.2": { "Exclusive": { "가격": 4500, "옵션": {} } } } }"#;

    #[tokio::test]
    async fn loads_parses_and_caches() {
        let source = Arc::new(InMemoryCatalogSource::new().with("RV", RV));
        let cache = Arc::new(InMemoryCatalogCache::new());
        let loader = CatalogLoader::new(source.clone(), cache.clone());

        let first = loader.load("RV").await.unwrap();
        assert!(first.model("Palisade").is_some());
        assert_eq!(cache.len(), 1);

        // Later source edits are not seen until the entry is invalidated.
        source.insert("RV", "{}");
        let second = loader.load("RV").await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        loader.invalidate("RV");
        assert!(loader.load("RV").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_category_is_unavailable() {
        let loader = CatalogLoader::new(Arc::new(InMemoryCatalogSource::new()), Arc::new(NoCatalogCache));
        let err = loader.load("EV").await.unwrap_err();
        assert_eq!(
            err,
            ConfiguratorError::unavailable("EV", "no catalog for category 'EV'")
        );
    }

    #[tokio::test]
    async fn malformed_document_is_unavailable_and_not_cached() {
        let source = Arc::new(InMemoryCatalogSource::new().with("PBV", r#"{ "ST1": 3 }"#));
        let cache = Arc::new(InMemoryCatalogCache::new());
        let loader = CatalogLoader::new(source, cache.clone());

        let err = loader.load("PBV").await.unwrap_err();
        assert_eq!(err.code(), "catalog_unavailable");
        assert!(err.to_string().contains("malformed catalog at $.ST1"));
        assert!(cache.is_empty());
    }
}
