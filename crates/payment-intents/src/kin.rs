//! The wallet's amount type.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Base units per whole kin.
pub const QUARKS_PER_KIN: u64 = 100_000;

/// An amount of kin, stored as indivisible quarks.
///
/// Bucket accounts only ever hold whole-kin multiples of their
/// denomination; quark precision exists for fees and external deposits.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Kin {
    quarks: u64,
}

impl Kin {
    pub const ZERO: Kin = Kin { quarks: 0 };

    pub const fn from_kin(kin: u64) -> Kin {
        Kin {
            quarks: kin * QUARKS_PER_KIN,
        }
    }

    pub const fn from_quarks(quarks: u64) -> Kin {
        Kin { quarks }
    }

    pub const fn quarks(self) -> u64 {
        self.quarks
    }

    /// Whole-kin value, fractional quarks truncated.
    pub const fn truncated_kin_value(self) -> u64 {
        self.quarks / QUARKS_PER_KIN
    }

    /// Whether the amount is at least one whole kin.
    pub const fn has_whole_kin(self) -> bool {
        self.quarks >= QUARKS_PER_KIN
    }

    /// Fee in quarks for a basis-point rate, truncating.
    pub const fn calculate_fee(self, bps: u16) -> Kin {
        Kin {
            quarks: self.quarks * bps as u64 / 10_000,
        }
    }

    pub fn checked_sub(self, other: Kin) -> Option<Kin> {
        self.quarks.checked_sub(other.quarks).map(Kin::from_quarks)
    }
}

impl Add for Kin {
    type Output = Kin;

    fn add(self, other: Kin) -> Kin {
        Kin {
            quarks: self.quarks.saturating_add(other.quarks),
        }
    }
}

impl Sub for Kin {
    type Output = Kin;

    fn sub(self, other: Kin) -> Kin {
        Kin {
            quarks: self.quarks.saturating_sub(other.quarks),
        }
    }
}

impl Mul<u64> for Kin {
    type Output = Kin;

    fn mul(self, count: u64) -> Kin {
        Kin {
            quarks: self.quarks.saturating_mul(count),
        }
    }
}

impl Sum for Kin {
    fn sum<I: Iterator<Item = Kin>>(iter: I) -> Kin {
        iter.fold(Kin::ZERO, Add::add)
    }
}

impl fmt::Display for Kin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.truncated_kin_value();
        let fraction = self.quarks % QUARKS_PER_KIN;
        if fraction == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.{fraction:05}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_kin_conversion() {
        assert_eq!(Kin::from_kin(2).quarks(), 200_000);
        assert_eq!(Kin::from_quarks(200_000).truncated_kin_value(), 2);
        assert_eq!(Kin::from_quarks(299_999).truncated_kin_value(), 2);
    }

    #[test]
    fn arithmetic() {
        let a = Kin::from_kin(10);
        let b = Kin::from_kin(3);
        assert_eq!(a + b, Kin::from_kin(13));
        assert_eq!(a - b, Kin::from_kin(7));
        assert_eq!(b * 4, Kin::from_kin(12));
    }

    #[test]
    fn subtraction_saturates() {
        assert_eq!(Kin::from_kin(1) - Kin::from_kin(5), Kin::ZERO);
    }

    #[test]
    fn checked_sub_flags_underflow() {
        assert!(Kin::from_kin(1).checked_sub(Kin::from_kin(5)).is_none());
        assert_eq!(
            Kin::from_kin(5).checked_sub(Kin::from_kin(1)),
            Some(Kin::from_kin(4))
        );
    }

    #[test]
    fn fee_calculation_truncates() {
        // 250 bps of 10 kin = 0.25 kin.
        assert_eq!(Kin::from_kin(10).calculate_fee(250).quarks(), 25_000);
        assert_eq!(Kin::from_quarks(3).calculate_fee(1).quarks(), 0);
    }

    #[test]
    fn sum_of_amounts() {
        let total: Kin = [Kin::from_kin(1), Kin::from_kin(2), Kin::from_kin(3)]
            .into_iter()
            .sum();
        assert_eq!(total, Kin::from_kin(6));
    }

    #[test]
    fn display_forms() {
        assert_eq!(Kin::from_kin(42).to_string(), "42");
        assert_eq!(Kin::from_quarks(150_000).to_string(), "1.50000");
    }

    #[test]
    fn serde_is_transparent_quarks() {
        let json = serde_json::to_string(&Kin::from_kin(1)).unwrap();
        assert_eq!(json, "100000");
        let back: Kin = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Kin::from_kin(1));
    }
}
