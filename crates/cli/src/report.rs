//! Plain-text rendering for catalog levels, option lists and price summaries.

use std::fmt::Write as _;

use carconfig_catalog::{Catalog, Model, Powertrain};
use carconfig_core::{PriceUnit, format_price};
use carconfig_engine::{Availability, OptionView, Pricing};

pub fn names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for name in names {
        let _ = writeln!(out, "{name}");
    }
    out
}

pub fn models(catalog: &Catalog) -> String {
    names(catalog.model_names())
}

pub fn powertrains(model: &Model) -> String {
    names(model.powertrain_names())
}

/// Trims of `powertrain` with their base price.
pub fn trims(powertrain: &Powertrain, unit: PriceUnit) -> String {
    let width = column_width(powertrain.trims.iter().map(|t| t.name.as_str()));
    let mut out = String::new();
    for trim in &powertrain.trims {
        let _ = writeln!(
            out,
            "{:<width$}  {}",
            trim.name,
            format_price(trim.display_price(unit))
        );
    }
    out
}

/// Colors of `powertrain` followed by the option list of the chosen trim.
pub fn trim_details(powertrain: &Powertrain, options: &[OptionView], unit: PriceUnit) -> String {
    let mut out = String::new();

    out.push_str("Colors:\n");
    match &powertrain.colors {
        Some(colors) if !colors.is_empty() => {
            let width = column_width(colors.iter().map(|c| c.name.as_str()));
            for color in colors.iter() {
                let _ = writeln!(
                    out,
                    "  {:<width$}  {}",
                    color.name,
                    format_price(unit.apply(color.amount))
                );
            }
        }
        _ => out.push_str("  (none)\n"),
    }

    out.push_str("Options:\n");
    if options.is_empty() {
        out.push_str("  (none)\n");
    }
    let width = column_width(options.iter().map(|o| o.name.as_str()));
    for option in options {
        let mark = if option.checked { 'x' } else { ' ' };
        let _ = writeln!(
            out,
            "  [{mark}] {:<width$}  {:>14}  {}",
            option.name,
            format_price(option.list_price),
            availability_label(&option.availability)
        );
    }
    out
}

pub fn availability_label(availability: &Availability) -> String {
    match availability {
        Availability::Included => "standard".to_string(),
        Availability::Excluded => "not offered".to_string(),
        Availability::Blocked { missing } => format!("requires {}", missing.join(", ")),
        Availability::Selectable => "available".to_string(),
    }
}

/// Price breakdown with the number of selected options.
pub fn summary(pricing: &Pricing, selected_options: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Base price  {:>16}", format_price(pricing.base));
    let _ = writeln!(
        out,
        "Options     {:>16}  ({selected_options} selected)",
        format_price(pricing.options)
    );
    let _ = writeln!(out, "Color       {:>16}", format_price(pricing.color));
    let _ = writeln!(out, "Total       {:>16}", format_price(pricing.total));
    out
}

fn column_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0)
}
