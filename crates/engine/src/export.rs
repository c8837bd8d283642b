//! Configuration export record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pricing::Pricing;
use crate::selection::Selection;

/// A finished (or partial) configuration, independent of any catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRecord {
    pub category: Option<String>,
    pub model: Option<String>,
    pub powertrain: Option<String>,
    pub trim: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub options: BTreeMap<String, bool>,
    pub pricing: Pricing,
}

/// Snapshot `selection` and its `pricing` into a record.
pub fn serialize_configuration(selection: &Selection, pricing: &Pricing) -> ConfigurationRecord {
    ConfigurationRecord {
        category: selection.category().map(str::to_string),
        model: selection.model().map(str::to_string),
        powertrain: selection.powertrain().map(str::to_string),
        trim: selection.trim().map(str::to_string),
        color: selection.color().map(str::to_string),
        options: selection.options().clone(),
        pricing: *pricing,
    }
}

impl ConfigurationRecord {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Suggested download name, e.g. `car-config-Sonata-Premium.json`.
    pub fn file_name(&self) -> String {
        let mut parts = vec!["car-config".to_string()];
        parts.extend(
            [self.model.as_deref(), self.trim.as_deref()]
                .into_iter()
                .flatten()
                .map(|part| part.replace(['/', '\\'], "_")),
        );
        format!("{}.json", parts.join("-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carconfig_catalog::Catalog;
    use carconfig_core::PriceUnit;
    use serde_json::json;

    use crate::pricing::price;

    fn configured() -> (Selection, Pricing) {
        let catalog = Catalog::from_value(&json!({
            "Sonata": { "Gasoline 2.5": {
                "Premium": { "가격": 4500, "옵션": {
                    "Cruise": { "value": true },
                    "Sunroof": { "value": 100 }
                } },
                "색상": { "Red": { "value": 20 } }
            } }
        }))
        .unwrap();
        let s = Selection::for_category("승용")
            .choose_model(&catalog, "Sonata")
            .and_then(|s| s.choose_powertrain(&catalog, "Gasoline 2.5"))
            .and_then(|s| s.choose_trim(&catalog, "Premium"))
            .and_then(|s| s.choose_color(&catalog, Some("Red")))
            .and_then(|s| s.set_option(&catalog, "Sunroof", true))
            .unwrap();
        let (powertrain, trim) = s.current_trim(&catalog).unwrap();
        let pricing = price(trim, &s, powertrain.colors.as_ref(), PriceUnit::default());
        (s, pricing)
    }

    #[test]
    fn record_reflects_selection_and_pricing() {
        let (s, pricing) = configured();
        let record = serialize_configuration(&s, &pricing);
        assert_eq!(record.category.as_deref(), Some("승용"));
        assert_eq!(record.trim.as_deref(), Some("Premium"));
        assert_eq!(record.color.as_deref(), Some("Red"));
        assert_eq!(record.options.get("Cruise"), Some(&true));
        assert_eq!(record.pricing.total, 46_200_000);
    }

    #[test]
    fn json_round_trip_reproduces_every_field() {
        let (s, pricing) = configured();
        let record = serialize_configuration(&s, &pricing);
        let text = record.to_json_pretty().unwrap();
        assert_eq!(ConfigurationRecord::from_json_str(&text).unwrap(), record);
    }

    #[test]
    fn json_uses_flat_field_names() {
        let (s, pricing) = configured();
        let value = serde_json::to_value(serialize_configuration(&s, &pricing)).unwrap();
        assert_eq!(value["pricing"]["base"], json!(45_000_000));
        assert_eq!(value["options"]["Sunroof"], json!(true));
        assert_eq!(value["powertrain"], json!("Gasoline 2.5"));
    }

    #[test]
    fn file_name_uses_model_and_trim() {
        let (s, pricing) = configured();
        let record = serialize_configuration(&s, &pricing);
        assert_eq!(record.file_name(), "car-config-Sonata-Premium.json");

        let partial = serialize_configuration(&Selection::for_category("EV"), &Pricing::default());
        assert_eq!(partial.file_name(), "car-config.json");
    }
}
