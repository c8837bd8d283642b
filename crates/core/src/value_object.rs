//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. `Selection` and `Pricing` are value objects: every
/// transition yields a fresh selection and pricing is always recomputed,
/// never patched.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Pricing { base: i64, options: i64, color: i64, total: i64 }
///
/// impl ValueObject for Pricing {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
