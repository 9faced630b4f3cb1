//! Prices in US cents.
//!
//! The storefront sells in dollars only. Amounts are whole cents so sums
//! and line totals are exact; the decimal form only appears at the edges
//! (display and the persisted cart).

use std::fmt;
use std::iter::Sum;

use serde::{Deserialize, Serialize};

/// A dollar amount held as cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Money = Money::usd(0);

    pub const fn usd(cents: i64) -> Self {
        Self { cents }
    }

    /// Round a decimal dollar amount to the nearest cent.
    ///
    /// ```
    /// use techstore_commerce::Money;
    /// assert_eq!(Money::from_dollars(99.99).cents(), 9999);
    /// ```
    pub fn from_dollars(amount: f64) -> Self {
        Self::usd((amount * 100.0).round() as i64)
    }

    pub const fn cents(&self) -> i64 {
        self.cents
    }

    pub fn dollars(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Renders `$1234.50`, without digit grouping.
    pub fn display(&self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        format!("{}${}.{:02}", sign, abs / 100, abs % 100)
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.cents.checked_add(other.cents).map(Money::usd)
    }

    /// Price times a quantity, `None` on overflow.
    pub fn checked_times(self, quantity: u32) -> Option<Money> {
        self.cents.checked_mul(i64::from(quantity)).map(Money::usd)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Sums that overflow yield `None`.
impl Sum<Money> for Option<Money> {
    fn sum<I: Iterator<Item = Money>>(mut iter: I) -> Self {
        iter.try_fold(Money::ZERO, Money::checked_add)
    }
}

/// Serde adapter storing a [`Money`] as a plain decimal number (`99.99`).
///
/// Used for the persisted cart, whose JSON form carries prices as numbers.
pub mod as_decimal {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.dollars())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        f64::deserialize(deserializer).map(Money::from_dollars)
    }
}
