//! Infrastructure layer: catalog retrieval, caching, session storage, settings.
//!
//! Everything with IO or shared mutable state lives here; the domain crates
//! stay pure.

pub mod cache;
pub mod config;
pub mod configurator;
pub mod loader;
pub mod session_store;
pub mod source;

pub use cache::{CachedCatalog, CatalogCache, InMemoryCatalogCache, NoCatalogCache};
pub use config::{Settings, SettingsError};
pub use configurator::{Configurator, ServiceError};
pub use loader::CatalogLoader;
pub use session_store::{InMemorySessionStore, SessionHandle, SessionStore, SessionStoreError};
pub use source::{CatalogSource, FileCatalogSource, InMemoryCatalogSource, SourceError};
