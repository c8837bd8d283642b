//! One user's configuration session.
//!
//! A session is the single mutator of its selection. Catalog retrieval is the
//! only asynchronous step and is split in two: `choose_category` hands out a
//! [`LoadTicket`], and `complete_load` applies the result only if that ticket
//! is still the latest one. Results of superseded loads are discarded.

use std::sync::Arc;

use carconfig_catalog::{Catalog, Powertrain, Trim};
use carconfig_core::{ConfiguratorError, ConfiguratorResult, PriceUnit, SelectionLevel, SessionId};

use crate::availability::{self, Availability};
use crate::display::{self, OptionView};
use crate::export::{self, ConfigurationRecord};
use crate::pricing::{self, Pricing};
use crate::selection::Selection;

/// Categories offered when none are configured.
pub fn default_categories() -> Vec<String> {
    ["EV", "PBV", "승용", "RV", "택시상용"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Handle for one catalog retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    category: String,
    generation: u64,
}

impl LoadTicket {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Catalog status of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No category chosen yet.
    Idle,
    Loading(LoadTicket),
    Ready,
    /// The last retrieval failed; the session has no catalog.
    Unavailable { reason: String },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer category choice was made; the result was dropped.
    Superseded,
}

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    categories: Vec<String>,
    unit: PriceUnit,
    catalog: Option<Arc<Catalog>>,
    selection: Selection,
    load: LoadState,
    generation: u64,
}

impl Session {
    /// An empty category list accepts any non-empty category name.
    pub fn new(id: SessionId, categories: Vec<String>, unit: PriceUnit) -> Self {
        Self {
            id,
            categories,
            unit,
            catalog: None,
            selection: Selection::new(),
            load: LoadState::Idle,
            generation: 0,
        }
    }

    pub fn with_defaults(id: SessionId) -> Self {
        Self::new(id, default_categories(), PriceUnit::default())
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn unit(&self) -> PriceUnit {
        self.unit
    }

    pub fn catalog(&self) -> Option<&Arc<Catalog>> {
        self.catalog.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading(_))
    }

    /// Choose a category: the selection restarts and the catalog is dropped
    /// until the returned ticket is completed.
    pub fn choose_category(&mut self, category: &str) -> ConfiguratorResult<LoadTicket> {
        let known = if self.categories.is_empty() {
            !category.trim().is_empty()
        } else {
            self.categories.iter().any(|c| c == category)
        };
        if !known {
            return Err(ConfiguratorError::invalid(SelectionLevel::Category, category));
        }

        self.generation += 1;
        let ticket = LoadTicket {
            category: category.to_string(),
            generation: self.generation,
        };

        if let LoadState::Loading(previous) = &self.load {
            tracing::debug!(
                session_id = %self.id,
                superseded = previous.category(),
                "category changed while a catalog load was pending"
            );
        }

        self.selection = Selection::for_category(category);
        self.catalog = None;
        self.load = LoadState::Loading(ticket.clone());
        tracing::debug!(session_id = %self.id, category, generation = ticket.generation, "category chosen");
        Ok(ticket)
    }

    /// Apply the result of the retrieval started by `ticket`.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        result: ConfiguratorResult<Arc<Catalog>>,
    ) -> ConfiguratorResult<LoadOutcome> {
        if self.load != LoadState::Loading(ticket.clone()) {
            tracing::warn!(
                session_id = %self.id,
                category = ticket.category(),
                generation = ticket.generation,
                "discarding superseded catalog load"
            );
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(catalog) => {
                tracing::info!(
                    session_id = %self.id,
                    category = ticket.category(),
                    models = catalog.models().len(),
                    "catalog applied"
                );
                self.catalog = Some(catalog);
                self.load = LoadState::Ready;
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                let err = match err {
                    unavailable @ ConfiguratorError::CatalogUnavailable { .. } => unavailable,
                    other => ConfiguratorError::unavailable(ticket.category(), other.to_string()),
                };
                tracing::warn!(session_id = %self.id, error = %err, "catalog load failed");
                self.load = LoadState::Unavailable {
                    reason: err.to_string(),
                };
                Err(err)
            }
        }
    }

    pub fn choose_model(&mut self, model: &str) -> ConfiguratorResult<()> {
        let next = self.selection.choose_model(self.require_catalog()?, model)?;
        self.commit(next, "model chosen");
        Ok(())
    }

    pub fn choose_powertrain(&mut self, powertrain: &str) -> ConfiguratorResult<()> {
        let next = self.selection.choose_powertrain(self.require_catalog()?, powertrain)?;
        self.commit(next, "powertrain chosen");
        Ok(())
    }

    pub fn choose_trim(&mut self, trim: &str) -> ConfiguratorResult<()> {
        let next = self.selection.choose_trim(self.require_catalog()?, trim)?;
        self.commit(next, "trim chosen");
        Ok(())
    }

    /// `None` selects the standard paint.
    pub fn choose_color(&mut self, color: Option<&str>) -> ConfiguratorResult<()> {
        let next = self.selection.choose_color(self.require_catalog()?, color)?;
        self.commit(next, "color chosen");
        Ok(())
    }

    pub fn set_option(&mut self, option: &str, checked: bool) -> ConfiguratorResult<()> {
        let next = self.selection.set_option(self.require_catalog()?, option, checked)?;
        self.commit(next, "option changed");
        Ok(())
    }

    /// The chosen powertrain and trim, if the selection reaches one.
    pub fn current_trim(&self) -> Option<(&Powertrain, &Trim)> {
        self.catalog
            .as_deref()
            .and_then(|catalog| self.selection.current_trim(catalog))
    }

    pub fn availability(&self, option: &str) -> ConfiguratorResult<Availability> {
        let (_, trim) = self.require_trim(SelectionLevel::Option)?;
        availability::is_selectable(trim, option, &self.selection)
    }

    pub fn option_views(&self) -> ConfiguratorResult<Vec<OptionView>> {
        let (_, trim) = self.require_trim(SelectionLevel::Option)?;
        Ok(display::option_views(trim, &self.selection, self.unit))
    }

    /// All zeros until a trim is chosen.
    pub fn pricing(&self) -> Pricing {
        match self.current_trim() {
            Some((powertrain, trim)) => {
                pricing::price(trim, &self.selection, powertrain.colors.as_ref(), self.unit)
            }
            None => Pricing::default(),
        }
    }

    pub fn export(&self) -> ConfigurationRecord {
        export::serialize_configuration(&self.selection, &self.pricing())
    }

    /// The active catalog as editable text.
    pub fn catalog_text(&self) -> Option<String> {
        self.catalog.as_deref().map(Catalog::to_json_pretty)
    }

    /// Replace the catalog with an edited document.
    ///
    /// On a parse error nothing changes. On success the selection is
    /// reconciled against the new catalog, and a pending load is superseded.
    pub fn replace_catalog_text(&mut self, text: &str) -> ConfiguratorResult<()> {
        if self.selection.category().is_none() {
            return Err(ConfiguratorError::unavailable("", "no category chosen"));
        }

        let catalog = Catalog::from_json_str(text).inspect_err(|err| {
            tracing::warn!(session_id = %self.id, error = %err, "rejected catalog edit");
        })?;
        self.replace_catalog(Arc::new(catalog));
        Ok(())
    }

    /// Install `catalog` directly, reconciling the selection.
    pub fn replace_catalog(&mut self, catalog: Arc<Catalog>) {
        if self.is_loading() {
            self.generation += 1;
        }
        let next = self.selection.reconcile(&catalog);
        self.catalog = Some(catalog);
        self.load = LoadState::Ready;
        self.commit(next, "catalog replaced");
    }

    fn require_catalog(&self) -> ConfiguratorResult<&Catalog> {
        if let Some(catalog) = self.catalog.as_deref() {
            return Ok(catalog);
        }

        let category = self.selection.category().unwrap_or_default();
        let reason = match &self.load {
            LoadState::Idle => "no category chosen".to_string(),
            LoadState::Loading(_) => "catalog is still loading".to_string(),
            LoadState::Unavailable { reason } => reason.clone(),
            LoadState::Ready => "no catalog loaded".to_string(),
        };
        Err(ConfiguratorError::unavailable(category, reason))
    }

    fn require_trim(&self, level: SelectionLevel) -> ConfiguratorResult<(&Powertrain, &Trim)> {
        let catalog = self.require_catalog()?;
        match (self.selection.model(), self.selection.powertrain(), self.selection.trim()) {
            (Some(m), Some(p), Some(t)) => catalog.resolve_trim(m, p, t),
            _ => Err(ConfiguratorError::out_of_order(level, SelectionLevel::Trim)),
        }
    }

    fn commit(&mut self, next: Selection, what: &'static str) {
        tracing::debug!(
            session_id = %self.id,
            stage = ?next.stage(),
            selected_options = next.selected_option_count(),
            "{what}"
        );
        self.selection = next;
    }
}
