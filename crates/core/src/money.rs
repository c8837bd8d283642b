//! Catalog price units and the single display format.

use serde::{Deserialize, Serialize};

/// Multiplier from the catalog's price unit to display currency.
///
/// Catalog prices are written in units of 10,000 won by default, so a trim
/// listed at `4500` costs `45,000,000`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceUnit(u32);

impl PriceUnit {
    pub const DEFAULT: PriceUnit = PriceUnit(10_000);

    /// Returns `None` for a zero multiplier.
    pub fn new(multiplier: u32) -> Option<Self> {
        (multiplier > 0).then_some(Self(multiplier))
    }

    pub fn multiplier(&self) -> u32 {
        self.0
    }

    /// Convert a catalog amount into display currency (saturating).
    pub fn apply(&self, amount: i64) -> i64 {
        amount.saturating_mul(i64::from(self.0))
    }
}

impl Default for PriceUnit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Render an amount as `₩` with thousands grouping, e.g. `₩46,000,000`.
pub fn format_price(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-₩{grouped}")
    } else {
        format!("₩{grouped}")
    }
}
