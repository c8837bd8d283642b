//! Pricing engine.
//!
//! `price` is a pure function of `(trim, selection, colors, unit)` and is
//! recomputed from scratch after every selection change.

use serde::{Deserialize, Serialize};

use carconfig_catalog::{ColorSet, Trim, TrimOption};
use carconfig_core::{PriceUnit, ValueObject};

use crate::selection::Selection;

/// Price breakdown in display currency.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pricing {
    pub base: i64,
    pub options: i64,
    pub color: i64,
    pub total: i64,
}

impl ValueObject for Pricing {}

impl Pricing {
    pub fn new(base: i64, options: i64, color: i64) -> Self {
        Self {
            base,
            options,
            color,
            total: base.saturating_add(options).saturating_add(color),
        }
    }
}

/// Amount (catalog units) an option contributes under `selection`.
///
/// The first conditional entry whose `requires` are all checked wins; otherwise
/// the option's own list price, or 0 for fixed options.
pub fn resolve_option_amount(option: &TrimOption, selection: &Selection) -> i64 {
    option
        .conditional_pricing
        .iter()
        .find(|c| c.requires.iter().all(|name| selection.is_checked(name)))
        .map(|c| c.amount)
        .or_else(|| option.inclusion.list_price())
        .unwrap_or(0)
}

/// Price the selection on `trim`. `colors` is the powertrain's color set.
pub fn price(trim: &Trim, selection: &Selection, colors: Option<&ColorSet>, unit: PriceUnit) -> Pricing {
    let base = unit.apply(trim.base_price);

    let options = trim
        .options
        .iter()
        .filter(|option| selection.is_checked(&option.name))
        .map(|option| unit.apply(resolve_option_amount(option, selection)))
        .fold(0i64, i64::saturating_add);

    let color = selection
        .color()
        .and_then(|name| colors.and_then(|set| set.get(name)))
        .map(|c| unit.apply(c.amount))
        .unwrap_or(0);

    Pricing::new(base, options, color)
}
