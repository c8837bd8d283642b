//! Option availability and prerequisite checks.
//!
//! Availability is recomputed on every query from `(trim, selection)`; nothing
//! is cached. Unchecking a prerequisite never unchecks its dependents: they are
//! simply reported as `Blocked` the next time they are evaluated.

use serde::Serialize;

use carconfig_catalog::{InclusionMode, Trim, TrimOption};
use carconfig_core::{ConfiguratorError, ConfiguratorResult, SelectionLevel};

use crate::selection::Selection;

/// Whether an option can be toggled under the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Availability {
    /// Standard equipment, always on.
    Included,
    /// Not offered, always off.
    Excluded,
    /// Prerequisites not met; `missing` keeps the option's `requires` order.
    Blocked { missing: Vec<String> },
    Selectable,
}

impl Availability {
    pub fn is_fixed(&self) -> bool {
        matches!(self, Availability::Included | Availability::Excluded)
    }
}

/// Evaluate one option of `trim`.
pub fn is_selectable(trim: &Trim, option: &str, selection: &Selection) -> ConfiguratorResult<Availability> {
    let option = trim.resolve_option(option)?;
    Ok(availability_of(trim, option, selection))
}

pub(crate) fn availability_of(trim: &Trim, option: &TrimOption, selection: &Selection) -> Availability {
    match option.inclusion {
        InclusionMode::AlwaysIncluded => Availability::Included,
        InclusionMode::AlwaysExcluded => Availability::Excluded,
        InclusionMode::Priced(_) => {
            let missing = missing_requirements(trim, option, selection);
            if missing.is_empty() {
                Availability::Selectable
            } else {
                Availability::Blocked { missing }
            }
        }
    }
}

/// A requirement holds when the referenced option is standard equipment or is
/// currently checked. Names absent from the trim can only hold by being checked,
/// which `set_option` never allows, so they stay missing.
fn missing_requirements(trim: &Trim, option: &TrimOption, selection: &Selection) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for name in &option.requires {
        let included = trim
            .option(name)
            .is_some_and(|required| required.inclusion.is_always_included());
        if !included && !selection.is_checked(name) && !missing.contains(name) {
            missing.push(name.clone());
        }
    }
    missing
}

/// Check or uncheck an option, returning the new selection.
///
/// Fixed options are rejected with `ImmutableOption`; checking a blocked option
/// is rejected with `Dependency`. Unchecking is always allowed and never
/// cascades. `trim` must be the trim `selection` resolves to in the active
/// catalog; callers go through [`Selection::set_option`], which resolves it.
pub(crate) fn set_option(
    trim: &Trim,
    option: &str,
    checked: bool,
    selection: &Selection,
) -> ConfiguratorResult<Selection> {
    if selection.trim() != Some(trim.name.as_str()) {
        return Err(ConfiguratorError::invalid(SelectionLevel::Trim, trim.name.as_str()));
    }

    let option_data = trim.resolve_option(option)?;
    match availability_of(trim, option_data, selection) {
        Availability::Included | Availability::Excluded => {
            tracing::debug!(option, "rejected toggle of fixed option");
            Err(ConfiguratorError::immutable(option))
        }
        Availability::Blocked { missing } if checked => {
            tracing::debug!(option, ?missing, "rejected option with unmet prerequisites");
            Err(ConfiguratorError::dependency(option, missing))
        }
        Availability::Blocked { .. } | Availability::Selectable => {
            Ok(selection.with_option_value(option, checked))
        }
    }
}
