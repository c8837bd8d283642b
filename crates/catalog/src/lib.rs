//! Catalog model: the category's model → powertrain → trim → option/color tree.
//!
//! A catalog is parsed from one JSON document per category and is read-only
//! afterwards, so it can be shared between sessions behind an `Arc`. Every
//! collection keeps document order; that order is the display order.

pub mod catalog;
pub mod parse;

pub use catalog::{
    Catalog, Color, ColorSet, ConditionalPrice, InclusionMode, Model, OptionSet, Powertrain, Trim,
    TrimOption,
};
pub use parse::{COLORS_KEY, OPTIONS_KEY, PRICE_KEY};
