//! Domain error model.

use thiserror::Error;

/// Result type used across the configurator domain.
pub type ConfiguratorResult<T> = Result<T, ConfiguratorError>;

/// One level of the ordered selection hierarchy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SelectionLevel {
    Category,
    Model,
    Powertrain,
    Trim,
    Color,
    Option,
}

impl SelectionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionLevel::Category => "category",
            SelectionLevel::Model => "model",
            SelectionLevel::Powertrain => "powertrain",
            SelectionLevel::Trim => "trim",
            SelectionLevel::Color => "color",
            SelectionLevel::Option => "option",
        }
    }
}

impl core::fmt::Display for SelectionLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configurator error.
///
/// Every variant is local and recoverable: the operation that produced it left
/// the prior catalog and selection untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfiguratorError {
    /// A catalog payload was structurally invalid and was rejected as a whole.
    #[error("malformed catalog at {path}: {reason}")]
    MalformedCatalog { path: String, reason: String },

    /// No catalog is available for the category (retrieval failed or still pending).
    #[error("catalog unavailable for category '{category}': {reason}")]
    CatalogUnavailable { category: String, reason: String },

    /// A key is not present at the expected level of the current catalog.
    #[error("invalid {level} selection: '{key}'")]
    InvalidSelection { level: SelectionLevel, key: String },

    /// A level was chosen before the level it depends on.
    #[error("cannot choose {level} before {prerequisite}")]
    SelectionOutOfOrder {
        level: SelectionLevel,
        prerequisite: SelectionLevel,
    },

    /// Attempt to toggle an always-included or always-excluded option.
    #[error("option '{option}' is fixed and cannot be changed")]
    ImmutableOption { option: String },

    /// Attempt to enable an option whose prerequisites are not satisfied.
    #[error("option '{option}' requires: {}", .missing.join(", "))]
    Dependency { option: String, missing: Vec<String> },
}

impl ConfiguratorError {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedCatalog {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn unavailable(category: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CatalogUnavailable {
            category: category.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid(level: SelectionLevel, key: impl Into<String>) -> Self {
        Self::InvalidSelection {
            level,
            key: key.into(),
        }
    }

    pub fn out_of_order(level: SelectionLevel, prerequisite: SelectionLevel) -> Self {
        Self::SelectionOutOfOrder {
            level,
            prerequisite,
        }
    }

    pub fn immutable(option: impl Into<String>) -> Self {
        Self::ImmutableOption {
            option: option.into(),
        }
    }

    pub fn dependency(option: impl Into<String>, missing: Vec<String>) -> Self {
        Self::Dependency {
            option: option.into(),
            missing,
        }
    }

    /// Short machine-readable code, stable across message wording changes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedCatalog { .. } => "malformed_catalog",
            Self::CatalogUnavailable { .. } => "catalog_unavailable",
            Self::InvalidSelection { .. } => "invalid_selection",
            Self::SelectionOutOfOrder { .. } => "selection_out_of_order",
            Self::ImmutableOption { .. } => "immutable_option",
            Self::Dependency { .. } => "dependency",
        }
    }
}
