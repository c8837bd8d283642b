//! Session-oriented service wiring sessions, catalog loading, and settings.
//!
//! Session locks are only held inside synchronous sections; the catalog fetch
//! runs unlocked, and its result goes through `Session::complete_load`, which
//! drops it if the user picked another category meanwhile.

use std::sync::Arc;

use thiserror::Error;

use carconfig_core::{ConfiguratorResult, PriceUnit, SessionId};
use carconfig_engine::{Availability, ConfigurationRecord, LoadOutcome, OptionView, Pricing, Session};

use crate::cache::{CatalogCache, InMemoryCatalogCache, NoCatalogCache};
use crate::config::Settings;
use crate::loader::CatalogLoader;
use crate::session_store::{InMemorySessionStore, SessionStore, SessionStoreError};
use crate::source::{CatalogSource, FileCatalogSource};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Session(#[from] SessionStoreError),
    #[error(transparent)]
    Domain(#[from] carconfig_core::ConfiguratorError),
}

pub struct Configurator {
    loader: CatalogLoader,
    sessions: Arc<dyn SessionStore>,
    categories: Vec<String>,
    unit: PriceUnit,
}

impl core::fmt::Debug for Configurator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Configurator")
            .field("categories", &self.categories)
            .field("unit", &self.unit)
            .finish_non_exhaustive()
    }
}

impl Configurator {
    pub fn new(loader: CatalogLoader, sessions: Arc<dyn SessionStore>, categories: Vec<String>, unit: PriceUnit) -> Self {
        Self {
            loader,
            sessions,
            categories,
            unit,
        }
    }

    /// In-process configurator reading catalogs through `source`.
    pub fn with_source(settings: &Settings, source: Arc<dyn CatalogSource>) -> Self {
        let cache: Arc<dyn CatalogCache> = if settings.cache_catalogs {
            Arc::new(InMemoryCatalogCache::new())
        } else {
            Arc::new(NoCatalogCache)
        };
        Self::new(
            CatalogLoader::new(source, cache),
            InMemorySessionStore::arc(),
            settings.categories.clone(),
            settings.price_unit,
        )
    }

    /// In-process configurator reading catalogs from `settings.catalog_dir`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_source(settings, Arc::new(FileCatalogSource::new(&settings.catalog_dir)))
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn loader(&self) -> &CatalogLoader {
        &self.loader
    }

    pub fn open_session(&self) -> Result<SessionId, ServiceError> {
        let session = Session::new(SessionId::new(), self.categories.clone(), self.unit);
        let id = session.id();
        self.sessions.insert(session)?;
        tracing::debug!(session_id = %id, "session opened");
        Ok(id)
    }

    pub fn close_session(&self, id: SessionId) -> Result<(), ServiceError> {
        self.sessions.remove(id)?;
        tracing::debug!(session_id = %id, "session closed");
        Ok(())
    }

    /// Copy of the session's current state.
    pub fn snapshot(&self, id: SessionId) -> Result<Session, ServiceError> {
        self.with_session(id, |s| Ok(s.clone()))
    }

    /// Choose a category and load its catalog.
    ///
    /// Returns `Superseded` when another category was chosen for the same
    /// session while this load was in flight.
    pub async fn choose_category(&self, id: SessionId, category: &str) -> Result<LoadOutcome, ServiceError> {
        let ticket = self.with_session(id, |s| s.choose_category(category))?;
        let result = self.loader.load(ticket.category()).await;
        self.with_session(id, |s| s.complete_load(&ticket, result))
    }

    pub fn choose_model(&self, id: SessionId, model: &str) -> Result<(), ServiceError> {
        self.with_session(id, |s| s.choose_model(model))
    }

    pub fn choose_powertrain(&self, id: SessionId, powertrain: &str) -> Result<(), ServiceError> {
        self.with_session(id, |s| s.choose_powertrain(powertrain))
    }

    pub fn choose_trim(&self, id: SessionId, trim: &str) -> Result<(), ServiceError> {
        self.with_session(id, |s| s.choose_trim(trim))
    }

    pub fn choose_color(&self, id: SessionId, color: Option<&str>) -> Result<(), ServiceError> {
        self.with_session(id, |s| s.choose_color(color))
    }

    pub fn set_option(&self, id: SessionId, option: &str, checked: bool) -> Result<(), ServiceError> {
        self.with_session(id, |s| s.set_option(option, checked))
    }

    pub fn availability(&self, id: SessionId, option: &str) -> Result<Availability, ServiceError> {
        self.with_session(id, |s| s.availability(option))
    }

    pub fn option_views(&self, id: SessionId) -> Result<Vec<OptionView>, ServiceError> {
        self.with_session(id, |s| s.option_views())
    }

    pub fn pricing(&self, id: SessionId) -> Result<Pricing, ServiceError> {
        self.with_session(id, |s| Ok(s.pricing()))
    }

    pub fn export(&self, id: SessionId) -> Result<ConfigurationRecord, ServiceError> {
        self.with_session(id, |s| Ok(s.export()))
    }

    pub fn catalog_text(&self, id: SessionId) -> Result<Option<String>, ServiceError> {
        self.with_session(id, |s| Ok(s.catalog_text()))
    }

    pub fn replace_catalog_text(&self, id: SessionId, text: &str) -> Result<(), ServiceError> {
        self.with_session(id, |s| s.replace_catalog_text(text))
    }

    fn with_session<R>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut Session) -> ConfiguratorResult<R>,
    ) -> Result<R, ServiceError> {
        let handle = self.sessions.get(id)?;
        let mut session = handle.lock().map_err(|_| SessionStoreError::Poisoned)?;
        Ok(f(&mut session)?)
    }
}
