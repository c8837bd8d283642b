//! `carconfig-core`: shared building blocks for the configurator.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use error::{ConfiguratorError, ConfiguratorResult, SelectionLevel};
pub use id::SessionId;
pub use money::{PriceUnit, format_price};
pub use value_object::ValueObject;
