//! Plain arithmetic semirings: reals, booleans and derivation counts.

use serde::{Deserialize, Serialize};

use crate::semiring::{DivisionSemiring, Semiring, StarSemiring, ToReal};

impl Semiring for f64 {
    const NAME: &'static str = "real";

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    #[inline]
    fn mul(&self, other: &Self) -> Self {
        self * other
    }

    #[inline]
    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    #[inline]
    fn is_one(&self) -> bool {
        *self == 1.0
    }
}

impl StarSemiring for f64 {
    /// Geometric series `1 / (1 - x)`, infinite when it diverges.
    fn star(&self) -> Self {
        if *self >= 1.0 {
            f64::INFINITY
        } else {
            1.0 / (1.0 - self)
        }
    }
}

impl DivisionSemiring for f64 {
    fn div(&self, other: &Self) -> Self {
        if *other == 0.0 {
            0.0
        } else {
            self / other
        }
    }
}

impl ToReal for f64 {
    fn to_real(&self) -> f64 {
        *self
    }
}

impl Semiring for bool {
    const NAME: &'static str = "boolean";

    #[inline]
    fn zero() -> Self {
        false
    }

    #[inline]
    fn one() -> Self {
        true
    }

    #[inline]
    fn add(&self, other: &Self) -> Self {
        *self || *other
    }

    #[inline]
    fn mul(&self, other: &Self) -> Self {
        *self && *other
    }

    #[inline]
    fn is_zero(&self) -> bool {
        !*self
    }

    #[inline]
    fn is_one(&self) -> bool {
        *self
    }
}

impl StarSemiring for bool {
    fn star(&self) -> Self {
        true
    }
}

/// Number of derivations, saturating at `u64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Count(pub u64);

impl Semiring for Count {
    const NAME: &'static str = "count";

    fn zero() -> Self {
        Count(0)
    }

    fn one() -> Self {
        Count(1)
    }

    fn add(&self, other: &Self) -> Self {
        Count(self.0.saturating_add(other.0))
    }

    fn mul(&self, other: &Self) -> Self {
        Count(self.0.saturating_mul(other.0))
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn is_one(&self) -> bool {
        self.0 == 1
    }
}

impl ToReal for Count {
    fn to_real(&self) -> f64 {
        self.0 as f64
    }
}
