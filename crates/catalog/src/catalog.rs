use carconfig_core::{ConfiguratorError, ConfiguratorResult, PriceUnit, SelectionLevel};

/// A category's catalog: model name → [`Model`], in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    models: Vec<Model>,
}

impl Catalog {
    pub fn new(models: Vec<Model>) -> Self {
        Self { models }
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name.as_str())
    }

    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn resolve_model(&self, name: &str) -> ConfiguratorResult<&Model> {
        self.model(name)
            .ok_or_else(|| ConfiguratorError::invalid(SelectionLevel::Model, name))
    }

    /// Walk model → powertrain → trim, failing at the first missing key.
    pub fn resolve_trim(
        &self,
        model: &str,
        powertrain: &str,
        trim: &str,
    ) -> ConfiguratorResult<(&Powertrain, &Trim)> {
        let powertrain = self.resolve_model(model)?.resolve_powertrain(powertrain)?;
        let trim = powertrain.resolve_trim(trim)?;
        Ok((powertrain, trim))
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// A model: powertrain name → [`Powertrain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub name: String,
    pub powertrains: Vec<Powertrain>,
}

impl Model {
    pub fn new(name: impl Into<String>, powertrains: Vec<Powertrain>) -> Self {
        Self {
            name: name.into(),
            powertrains,
        }
    }

    pub fn powertrain_names(&self) -> impl Iterator<Item = &str> {
        self.powertrains.iter().map(|p| p.name.as_str())
    }

    pub fn powertrain(&self, name: &str) -> Option<&Powertrain> {
        self.powertrains.iter().find(|p| p.name == name)
    }

    pub fn resolve_powertrain(&self, name: &str) -> ConfiguratorResult<&Powertrain> {
        self.powertrain(name)
            .ok_or_else(|| ConfiguratorError::invalid(SelectionLevel::Powertrain, name))
    }
}

/// A powertrain: its trims plus an optional color set shared by every trim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Powertrain {
    pub name: String,
    pub trims: Vec<Trim>,
    pub colors: Option<ColorSet>,
}

impl Powertrain {
    pub fn new(name: impl Into<String>, trims: Vec<Trim>, colors: Option<ColorSet>) -> Self {
        Self {
            name: name.into(),
            trims,
            colors,
        }
    }

    pub fn trim_names(&self) -> impl Iterator<Item = &str> {
        self.trims.iter().map(|t| t.name.as_str())
    }

    pub fn trim(&self, name: &str) -> Option<&Trim> {
        self.trims.iter().find(|t| t.name == name)
    }

    pub fn resolve_trim(&self, name: &str) -> ConfiguratorResult<&Trim> {
        self.trim(name)
            .ok_or_else(|| ConfiguratorError::invalid(SelectionLevel::Trim, name))
    }

    pub fn color(&self, name: &str) -> Option<&Color> {
        self.colors.as_ref().and_then(|set| set.get(name))
    }

    /// A powertrain without a color set accepts no named color.
    pub fn resolve_color(&self, name: &str) -> ConfiguratorResult<&Color> {
        self.color(name)
            .ok_or_else(|| ConfiguratorError::invalid(SelectionLevel::Color, name))
    }
}

/// A purchasable trim level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trim {
    pub name: String,
    /// Base price in catalog units.
    pub base_price: i64,
    pub options: OptionSet,
}

impl Trim {
    pub fn new(name: impl Into<String>, base_price: i64, options: OptionSet) -> Self {
        Self {
            name: name.into(),
            base_price,
            options,
        }
    }

    pub fn option(&self, name: &str) -> Option<&TrimOption> {
        self.options.get(name)
    }

    pub fn resolve_option(&self, name: &str) -> ConfiguratorResult<&TrimOption> {
        self.option(name)
            .ok_or_else(|| ConfiguratorError::invalid(SelectionLevel::Option, name))
    }

    pub fn display_price(&self, unit: PriceUnit) -> i64 {
        unit.apply(self.base_price)
    }

    /// Names of options that are part of the trim no matter what.
    pub fn always_included(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|o| o.inclusion.is_always_included())
            .map(|o| o.name.as_str())
    }
}

/// A trim's options keyed by unique name, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    options: Vec<TrimOption>,
}

impl OptionSet {
    pub fn new(options: Vec<TrimOption>) -> Self {
        Self { options }
    }

    pub fn get(&self, name: &str) -> Option<&TrimOption> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrimOption> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// How an option participates in a trim.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InclusionMode {
    /// Standard equipment: always on, cannot be toggled.
    AlwaysIncluded,
    /// Not offered on this trim: always off, cannot be toggled.
    AlwaysExcluded,
    /// Optional, at this list price (catalog units).
    Priced(i64),
}

impl InclusionMode {
    pub fn is_always_included(&self) -> bool {
        matches!(self, InclusionMode::AlwaysIncluded)
    }

    pub fn is_fixed(&self) -> bool {
        !matches!(self, InclusionMode::Priced(_))
    }

    pub fn list_price(&self) -> Option<i64> {
        match self {
            InclusionMode::Priced(amount) => Some(*amount),
            _ => None,
        }
    }
}

/// An add-on offered on a trim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimOption {
    pub name: String,
    pub inclusion: InclusionMode,
    /// Options that must be included or selected before this one can be.
    pub requires: Vec<String>,
    /// Price overrides, first match wins.
    pub conditional_pricing: Vec<ConditionalPrice>,
}

impl TrimOption {
    pub fn new(name: impl Into<String>, inclusion: InclusionMode) -> Self {
        Self {
            name: name.into(),
            inclusion,
            requires: Vec::new(),
            conditional_pricing: Vec::new(),
        }
    }

    pub fn with_requires<I, S>(mut self, requires: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires = requires.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_conditional(mut self, conditional: ConditionalPrice) -> Self {
        self.conditional_pricing.push(conditional);
        self
    }
}

/// An override price that applies when every listed option is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalPrice {
    pub requires: Vec<String>,
    pub amount: i64,
}

impl ConditionalPrice {
    pub fn new<I, S>(requires: I, amount: i64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            requires: requires.into_iter().map(Into::into).collect(),
            amount,
        }
    }
}

/// Paint colors offered for a powertrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorSet {
    colors: Vec<Color>,
}

impl ColorSet {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn get(&self, name: &str) -> Option<&Color> {
        self.colors.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    pub name: String,
    /// Surcharge in catalog units.
    pub amount: i64,
}

impl Color {
    pub fn new(name: impl Into<String>, amount: i64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        let options = OptionSet::new(vec![
            TrimOption::new("Cruise", InclusionMode::AlwaysIncluded),
            TrimOption::new("Sunroof", InclusionMode::Priced(100)),
            TrimOption::new("Tow Hitch", InclusionMode::AlwaysExcluded),
        ]);
        let colors = ColorSet::new(vec![Color::new("Red", 20)]);
        let powertrain = Powertrain::new(
            "Gasoline 2.5",
            vec![Trim::new("Premium", 4500, options)],
            Some(colors),
        );
        Catalog::new(vec![Model::new("Sonata", vec![powertrain])])
    }

    #[test]
    fn resolve_trim_walks_the_tree() {
        let catalog = sample();
        let (powertrain, trim) = catalog
            .resolve_trim("Sonata", "Gasoline 2.5", "Premium")
            .unwrap();
        assert_eq!(powertrain.name, "Gasoline 2.5");
        assert_eq!(trim.base_price, 4500);
    }

    #[test]
    fn resolve_reports_the_first_missing_level() {
        let catalog = sample();
        assert_eq!(
            catalog.resolve_trim("Avante", "Gasoline 2.5", "Premium"),
            Err(ConfiguratorError::invalid(SelectionLevel::Model, "Avante"))
        );
        assert_eq!(
            catalog.resolve_trim("Sonata", "Hybrid", "Premium"),
            Err(ConfiguratorError::invalid(SelectionLevel::Powertrain, "Hybrid"))
        );
        assert_eq!(
            catalog.resolve_trim("Sonata", "Gasoline 2.5", "Base"),
            Err(ConfiguratorError::invalid(SelectionLevel::Trim, "Base"))
        );
    }

    #[test]
    fn always_included_lists_standard_equipment() {
        let catalog = sample();
        let (_, trim) = catalog
            .resolve_trim("Sonata", "Gasoline 2.5", "Premium")
            .unwrap();
        assert_eq!(trim.always_included().collect::<Vec<_>>(), vec!["Cruise"]);
    }

    #[test]
    fn colors_are_optional_per_powertrain() {
        let bare = Powertrain::new("EV", Vec::new(), None);
        assert!(bare.color("Red").is_none());
        assert_eq!(
            bare.resolve_color("Red"),
            Err(ConfiguratorError::invalid(SelectionLevel::Color, "Red"))
        );
    }
}
