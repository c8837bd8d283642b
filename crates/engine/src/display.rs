//! Option listing for presentation layers.

use std::cmp::Ordering;

use serde::Serialize;

use carconfig_catalog::{InclusionMode, Trim};
use carconfig_core::PriceUnit;

use crate::availability::{Availability, availability_of};
use crate::selection::Selection;

/// One row of the option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub name: String,
    pub availability: Availability,
    /// Checked when selected or standard equipment.
    pub checked: bool,
    /// List price in display currency (0 for fixed options).
    pub list_price: i64,
    pub requires: Vec<String>,
}

/// Options of `trim`: standard equipment first, then priced options, then
/// excluded ones, each group by name ignoring case.
pub fn option_views(trim: &Trim, selection: &Selection, unit: PriceUnit) -> Vec<OptionView> {
    let mut options: Vec<_> = trim.options.iter().collect();
    options.sort_by(|a, b| match group(a.inclusion).cmp(&group(b.inclusion)) {
        Ordering::Equal => by_name(&a.name, &b.name),
        other => other,
    });

    options
        .into_iter()
        .map(|option| OptionView {
            name: option.name.clone(),
            availability: availability_of(trim, option, selection),
            checked: option.inclusion.is_always_included() || selection.is_checked(&option.name),
            list_price: unit.apply(option.inclusion.list_price().unwrap_or(0)),
            requires: option.requires.clone(),
        })
        .collect()
}

/// Case-insensitive, with byte order as the tiebreak so the order is total.
fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn group(mode: InclusionMode) -> u8 {
    match mode {
        InclusionMode::AlwaysIncluded => 0,
        InclusionMode::Priced(_) => 1,
        InclusionMode::AlwaysExcluded => 2,
    }
}
