//! The ordered selection: category → model → powertrain → trim → color/options.
//!
//! A [`Selection`] is a value. Every transition validates its key against the
//! catalog and returns a new selection; the receiver is never touched, so a
//! rejected transition leaves the caller's state exactly as it was.

use std::collections::BTreeMap;

use serde::Serialize;

use carconfig_catalog::{Catalog, InclusionMode, Powertrain, Trim};
use carconfig_core::{ConfiguratorError, ConfiguratorResult, SelectionLevel, ValueObject};

use crate::availability;

/// How far down the hierarchy a selection has progressed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SelectionStage {
    NoCategory,
    CategoryChosen,
    ModelChosen,
    PowertrainChosen,
    TrimChosen,
}

/// Current choices of one session.
///
/// Invariant: a field is only set when every field above it is set, and
/// `options` only holds keys of the chosen trim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    category: Option<String>,
    model: Option<String>,
    powertrain: Option<String>,
    trim: Option<String>,
    color: Option<String>,
    options: BTreeMap<String, bool>,
}

impl ValueObject for Selection {}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh selection for `category`; everything below it is unset.
    pub fn for_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn powertrain(&self) -> Option<&str> {
        self.powertrain.as_deref()
    }

    pub fn trim(&self) -> Option<&str> {
        self.trim.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn options(&self) -> &BTreeMap<String, bool> {
        &self.options
    }

    /// True only for an explicit `true` entry.
    pub fn is_checked(&self, option: &str) -> bool {
        self.options.get(option).copied().unwrap_or(false)
    }

    pub fn selected_option_count(&self) -> usize {
        self.options.values().filter(|checked| **checked).count()
    }

    pub fn stage(&self) -> SelectionStage {
        match (&self.category, &self.model, &self.powertrain, &self.trim) {
            (None, ..) => SelectionStage::NoCategory,
            (Some(_), None, ..) => SelectionStage::CategoryChosen,
            (Some(_), Some(_), None, _) => SelectionStage::ModelChosen,
            (Some(_), Some(_), Some(_), None) => SelectionStage::PowertrainChosen,
            (Some(_), Some(_), Some(_), Some(_)) => SelectionStage::TrimChosen,
        }
    }

    /// Choose a model; powertrain, trim, color and options are reset.
    pub fn choose_model(&self, catalog: &Catalog, model: &str) -> ConfiguratorResult<Selection> {
        let category = self
            .category
            .clone()
            .ok_or_else(|| ConfiguratorError::out_of_order(SelectionLevel::Model, SelectionLevel::Category))?;
        catalog.resolve_model(model)?;

        Ok(Selection {
            category: Some(category),
            model: Some(model.to_string()),
            ..Self::default()
        })
    }

    /// Choose a powertrain; trim, color and options are reset.
    pub fn choose_powertrain(&self, catalog: &Catalog, powertrain: &str) -> ConfiguratorResult<Selection> {
        let model = self
            .model
            .as_deref()
            .ok_or_else(|| ConfiguratorError::out_of_order(SelectionLevel::Powertrain, SelectionLevel::Model))?;
        catalog.resolve_model(model)?.resolve_powertrain(powertrain)?;

        Ok(Selection {
            category: self.category.clone(),
            model: self.model.clone(),
            powertrain: Some(powertrain.to_string()),
            ..Self::default()
        })
    }

    /// Choose a trim. Options are rebuilt from the trim's standard equipment
    /// and the color is reset.
    pub fn choose_trim(&self, catalog: &Catalog, trim: &str) -> ConfiguratorResult<Selection> {
        let (model, powertrain) = match (self.model.as_deref(), self.powertrain.as_deref()) {
            (Some(m), Some(p)) => (m, p),
            _ => {
                return Err(ConfiguratorError::out_of_order(
                    SelectionLevel::Trim,
                    SelectionLevel::Powertrain,
                ));
            }
        };
        let (_, trim_data) = catalog.resolve_trim(model, powertrain, trim)?;

        Ok(Selection {
            category: self.category.clone(),
            model: self.model.clone(),
            powertrain: self.powertrain.clone(),
            trim: Some(trim.to_string()),
            color: None,
            options: trim_data
                .always_included()
                .map(|name| (name.to_string(), true))
                .collect(),
        })
    }

    /// Choose a color, or `None` for the standard paint. Nothing cascades.
    pub fn choose_color(&self, catalog: &Catalog, color: Option<&str>) -> ConfiguratorResult<Selection> {
        let (powertrain, _) = self
            .current_trim(catalog)
            .ok_or_else(|| self.trim_missing_error(catalog, SelectionLevel::Color))?;
        if let Some(name) = color {
            powertrain.resolve_color(name)?;
        }

        Ok(Selection {
            color: color.map(str::to_string),
            ..self.clone()
        })
    }

    /// Check or uncheck an option of the chosen trim.
    pub fn set_option(&self, catalog: &Catalog, option: &str, checked: bool) -> ConfiguratorResult<Selection> {
        let (_, trim) = self
            .current_trim(catalog)
            .ok_or_else(|| self.trim_missing_error(catalog, SelectionLevel::Option))?;
        availability::set_option(trim, option, checked, self)
    }

    /// The chosen powertrain and trim, when the selection reaches a trim that
    /// exists in `catalog`.
    pub fn current_trim<'a>(&self, catalog: &'a Catalog) -> Option<(&'a Powertrain, &'a Trim)> {
        match (self.model.as_deref(), self.powertrain.as_deref(), self.trim.as_deref()) {
            (Some(m), Some(p), Some(t)) => catalog.resolve_trim(m, p, t).ok(),
            _ => None,
        }
    }

    /// Keep as much of this selection as is still valid in `catalog`.
    ///
    /// The longest surviving prefix of model → powertrain → trim is kept. When
    /// the trim survives, prior checks are kept for priced options that still
    /// exist, standard equipment is forced on, and excluded options dropped.
    /// The color survives only if the powertrain still offers it.
    pub fn reconcile(&self, catalog: &Catalog) -> Selection {
        let mut next = Selection {
            category: self.category.clone(),
            ..Self::default()
        };

        let Some(model) = self.model.as_deref().and_then(|m| catalog.model(m)) else {
            return next;
        };
        next.model = Some(model.name.clone());

        let Some(powertrain) = self.powertrain.as_deref().and_then(|p| model.powertrain(p)) else {
            return next;
        };
        next.powertrain = Some(powertrain.name.clone());

        let Some(trim) = self.trim.as_deref().and_then(|t| powertrain.trim(t)) else {
            return next;
        };
        next.trim = Some(trim.name.clone());

        next.options = trim
            .options
            .iter()
            .filter_map(|option| match option.inclusion {
                InclusionMode::AlwaysIncluded => Some((option.name.clone(), true)),
                InclusionMode::AlwaysExcluded => None,
                InclusionMode::Priced(_) => self
                    .options
                    .get(&option.name)
                    .map(|checked| (option.name.clone(), *checked)),
            })
            .collect();

        next.color = self
            .color
            .as_deref()
            .filter(|c| powertrain.color(c).is_some())
            .map(str::to_string);

        next
    }

    pub(crate) fn with_option_value(&self, option: &str, checked: bool) -> Selection {
        let mut next = self.clone();
        next.options.insert(option.to_string(), checked);
        next
    }

    fn trim_missing_error(&self, catalog: &Catalog, level: SelectionLevel) -> ConfiguratorError {
        match (self.model.as_deref(), self.powertrain.as_deref(), self.trim.as_deref()) {
            (Some(m), Some(p), Some(t)) => catalog
                .resolve_trim(m, p, t)
                .err()
                .unwrap_or_else(|| ConfiguratorError::invalid(SelectionLevel::Trim, t)),
            _ => ConfiguratorError::out_of_order(level, SelectionLevel::Trim),
        }
    }
}
