//! Selective semirings: best score (Viterbi) and cheapest cost (tropical).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::semiring::{Semiring, StarSemiring, ToReal};

/// Viterbi semiring over non-negative scores: (max, ×, 0, 1).
///
/// The inside value of the root is the score of the best derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaxTimes(pub f64);

impl Semiring for MaxTimes {
    const NAME: &'static str = "max-times";

    fn zero() -> Self {
        MaxTimes(0.0)
    }

    fn one() -> Self {
        MaxTimes(1.0)
    }

    fn add(&self, other: &Self) -> Self {
        MaxTimes(self.0.max(other.0))
    }

    fn mul(&self, other: &Self) -> Self {
        MaxTimes(self.0 * other.0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    fn is_one(&self) -> bool {
        self.0 == 1.0
    }
}

impl StarSemiring for MaxTimes {
    /// Cycles never improve a score bounded by one.
    fn star(&self) -> Self {
        if self.0 <= 1.0 {
            MaxTimes(1.0)
        } else {
            MaxTimes(f64::INFINITY)
        }
    }
}

impl ToReal for MaxTimes {
    fn to_real(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for MaxTimes {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Tropical semiring over costs: (min, +, +inf, 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinPlus(pub f64);

impl Semiring for MinPlus {
    const NAME: &'static str = "min-plus";

    fn zero() -> Self {
        MinPlus(f64::INFINITY)
    }

    fn one() -> Self {
        MinPlus(0.0)
    }

    fn add(&self, other: &Self) -> Self {
        MinPlus(self.0.min(other.0))
    }

    fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        MinPlus(self.0 + other.0)
    }

    fn is_zero(&self) -> bool {
        self.0 == f64::INFINITY
    }

    fn is_one(&self) -> bool {
        self.0 == 0.0
    }
}

impl StarSemiring for MinPlus {
    /// Non-negative cycles are never worth taking; negative ones diverge.
    fn star(&self) -> Self {
        if self.0 >= 0.0 {
            MinPlus(0.0)
        } else {
            MinPlus(f64::NEG_INFINITY)
        }
    }
}

impl ToReal for MinPlus {
    fn to_real(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for MinPlus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}
