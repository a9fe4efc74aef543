use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount in minor currency units (cents). Never a float.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    pub const fn minor(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `self × quantity`, or `None` when it does not fit.
    pub fn checked_times(self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(u64::from(quantity)).map(Money)
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Exact sum of `amounts`, or `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |total, amount| total.checked_add(amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_major_and_minor_units() {
        assert_eq!(Money::from_minor(1999).to_string(), "19.99");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn line_totals_sum() {
        let lines = [
            Money::from_minor(100).checked_times(2),
            Money::from_minor(80).checked_times(3),
        ];
        let total = Money::checked_sum(lines.into_iter().flatten());
        assert_eq!(total, Some(Money::from_minor(440)));
    }

    #[test]
    fn overflow_is_reported_not_clamped() {
        let half = Money::from_minor(u64::MAX / 2);
        assert_eq!(half.checked_times(3), None);
        assert_eq!(Money::checked_sum([half, half, half]), None);
        assert_eq!(
            Money::checked_sum([half, half]),
            Some(Money::from_minor(u64::MAX - 1))
        );
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Money::from_minor(250)).unwrap(), "250");
    }
}
