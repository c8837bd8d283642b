//! Configuration loading and representation.

use std::path::PathBuf;

use thiserror::Error;

use carconfig_core::PriceUnit;
use carconfig_engine::default_categories;

pub const CATALOG_DIR_VAR: &str = "CARCONFIG_CATALOG_DIR";
pub const PRICE_UNIT_VAR: &str = "CARCONFIG_PRICE_UNIT";
pub const CATEGORIES_VAR: &str = "CARCONFIG_CATEGORIES";
pub const CACHE_CATALOGS_VAR: &str = "CARCONFIG_CACHE_CATALOGS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidPriceUnit { var: &'static str, value: String },
    #[error("{var} must be 'true' or 'false', got '{value}'")]
    InvalidFlag { var: &'static str, value: String },
    #[error("{0} lists no categories")]
    EmptyCategories(&'static str),
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding one `{category}.json` per category.
    pub catalog_dir: PathBuf,
    pub price_unit: PriceUnit,
    pub categories: Vec<String>,
    /// Share parsed catalogs between sessions.
    pub cache_catalogs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from("data"),
            price_unit: PriceUnit::default(),
            categories: default_categories(),
            cache_catalogs: true,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build settings from an arbitrary variable lookup; unset variables keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(dir) = lookup(CATALOG_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            settings.catalog_dir = PathBuf::from(dir);
        } else {
            tracing::debug!(
                dir = %settings.catalog_dir.display(),
                "{CATALOG_DIR_VAR} not set; using default"
            );
        }

        if let Some(raw) = lookup(PRICE_UNIT_VAR) {
            settings.price_unit = parse_price_unit(&raw)?;
        }

        if let Some(raw) = lookup(CATEGORIES_VAR) {
            let categories: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();
            if categories.is_empty() {
                return Err(SettingsError::EmptyCategories(CATEGORIES_VAR));
            }
            settings.categories = categories;
        }

        if let Some(raw) = lookup(CACHE_CATALOGS_VAR) {
            settings.cache_catalogs = match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => {
                    return Err(SettingsError::InvalidFlag {
                        var: CACHE_CATALOGS_VAR,
                        value: raw,
                    });
                }
            };
        }

        Ok(settings)
    }
}

pub fn parse_price_unit(raw: &str) -> Result<PriceUnit, SettingsError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .and_then(PriceUnit::new)
        .ok_or_else(|| SettingsError::InvalidPriceUnit {
            var: PRICE_UNIT_VAR,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.categories, vec!["EV", "PBV", "승용", "RV", "택시상용"]);
        assert_eq!(settings.price_unit.multiplier(), 10_000);
    }

    #[test]
    fn reads_every_variable() {
        let settings = Settings::from_lookup(lookup(&[
            (CATALOG_DIR_VAR, "/srv/catalogs"),
            (PRICE_UNIT_VAR, "1000"),
            (CATEGORIES_VAR, "EV, RV ,,Trucks"),
            (CACHE_CATALOGS_VAR, "false"),
        ]))
        .unwrap();
        assert_eq!(settings.catalog_dir, PathBuf::from("/srv/catalogs"));
        assert_eq!(settings.price_unit.multiplier(), 1000);
        assert_eq!(settings.categories, vec!["EV", "RV", "Trucks"]);
        assert!(!settings.cache_catalogs);
    }

    #[test]
    fn rejects_bad_price_unit() {
        for bad in ["0", "-5", "ten", "1.5"] {
            assert_eq!(
                Settings::from_lookup(lookup(&[(PRICE_UNIT_VAR, bad)])),
                Err(SettingsError::InvalidPriceUnit {
                    var: PRICE_UNIT_VAR,
                    value: bad.to_string()
                })
            );
        }
    }

    #[test]
    fn rejects_empty_category_list() {
        assert_eq!(
            Settings::from_lookup(lookup(&[(CATEGORIES_VAR, " , ")])),
            Err(SettingsError::EmptyCategories(CATEGORIES_VAR))
        );
    }

    #[test]
    fn rejects_bad_cache_flag() {
        assert!(matches!(
            Settings::from_lookup(lookup(&[(CACHE_CATALOGS_VAR, "sometimes")])),
            Err(SettingsError::InvalidFlag { .. })
        ));
    }
}
