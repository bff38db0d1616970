//! Signed real numbers stored as `(sign, ln |x|)`.
//!
//! Products of many small probabilities underflow `f64` long before they
//! stop being meaningful. [`LogSpace`] keeps only the logarithm of the
//! magnitude, so values spanning thousands of orders of magnitude stay
//! representable. Addition uses the piecewise `log1pexp`/`log1mexp`
//! evaluations of Mächler's note on accurately computing `log(1 ± exp(x))`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::semiring::{DivisionSemiring, Semiring, StarSemiring, ToReal};

/// A signed real number stored in log space.
///
/// Zero is represented by `ell = -inf`; its sign bit is irrelevant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LogSpace {
    positive: bool,
    #[serde(with = "log_magnitude")]
    ell: f64,
}

impl LogSpace {
    /// The exact zero.
    pub const ZERO: LogSpace = LogSpace {
        positive: true,
        ell: f64::NEG_INFINITY,
    };

    /// The exact one.
    pub const ONE: LogSpace = LogSpace {
        positive: true,
        ell: 0.0,
    };

    /// Lifts an ordinary real number.
    pub fn lift(x: f64) -> Self {
        Self {
            positive: x >= 0.0,
            ell: safe_ln(x.abs()),
        }
    }

    /// Builds a value directly from its sign and log magnitude.
    pub fn from_log(positive: bool, ell: f64) -> Self {
        Self { positive, ell }
    }

    /// Natural log of the magnitude (`-inf` for zero).
    pub fn ln(&self) -> f64 {
        self.ell
    }

    /// Whether the represented number is non-negative.
    pub fn is_positive(&self) -> bool {
        self.positive || self.is_zero()
    }

    /// Additive inverse.
    pub fn neg(&self) -> Self {
        Self {
            positive: !self.positive,
            ell: self.ell,
        }
    }

    /// `self - other`
    pub fn sub(&self, other: &Self) -> Self {
        Semiring::add(self, &other.neg())
    }

    /// Materializes the real value; meant for output boundaries only.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            0.0
        } else if self.positive {
            self.ell.exp()
        } else {
            -self.ell.exp()
        }
    }

    /// Relative closeness test in log space, tolerant of huge magnitudes.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        if self.is_zero() || other.is_zero() {
            return self.is_zero() && other.is_zero();
        }
        self.positive == other.positive && (self.ell - other.ell).abs() <= tolerance
    }
}

impl Semiring for LogSpace {
    const NAME: &'static str = "logspace";

    fn zero() -> Self {
        Self::ZERO
    }

    fn one() -> Self {
        Self::ONE
    }

    fn add(&self, other: &Self) -> Self {
        let (big, small) = if self.ell < other.ell {
            (other, self)
        } else {
            (self, other)
        };
        if big.is_zero() {
            return *small;
        }
        if small.is_zero() {
            return *big;
        }
        let delta = small.ell - big.ell;
        if big.positive == small.positive {
            Self {
                positive: big.positive,
                ell: big.ell + log1pexp(delta),
            }
        } else if delta == 0.0 {
            Self::ZERO
        } else {
            Self {
                positive: big.positive,
                ell: big.ell + log1mexp(delta),
            }
        }
    }

    fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::ZERO;
        }
        Self {
            positive: self.positive == other.positive,
            ell: self.ell + other.ell,
        }
    }

    fn is_zero(&self) -> bool {
        self.ell == f64::NEG_INFINITY
    }

    fn is_one(&self) -> bool {
        self.positive && self.ell == 0.0
    }
}

impl DivisionSemiring for LogSpace {
    fn div(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::ZERO;
        }
        Self {
            positive: self.positive == other.positive,
            ell: self.ell - other.ell,
        }
    }
}

impl StarSemiring for LogSpace {
    /// `1 / (1 - x)` for `x < 1`; diverges to `+inf` otherwise.
    fn star(&self) -> Self {
        let denominator = Self::ONE.sub(self);
        if !denominator.is_positive() || denominator.is_zero() {
            return Self::from_log(true, f64::INFINITY);
        }
        Self::ONE.div(&denominator)
    }
}

impl ToReal for LogSpace {
    fn to_real(&self) -> f64 {
        self.to_f64()
    }
}

impl PartialEq for LogSpace {
    fn eq(&self, other: &Self) -> bool {
        if self.is_zero() || other.is_zero() {
            return self.is_zero() && other.is_zero();
        }
        self.positive == other.positive && self.ell == other.ell
    }
}

impl PartialOrd for LogSpace {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.is_positive(), other.is_positive()) {
            (true, false) => Some(Ordering::Greater),
            (false, true) => Some(Ordering::Less),
            (true, true) => self.ell.partial_cmp(&other.ell),
            (false, false) => other.ell.partial_cmp(&self.ell),
        }
    }
}

impl From<f64> for LogSpace {
    fn from(value: f64) -> Self {
        Self::lift(value)
    }
}

impl fmt::Display for LogSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.positive { '+' } else { '-' };
        write!(f, "{sign}exp({})", self.ell)
    }
}

// JSON has no infinities; the zero's `-inf` is written as `null`.
mod log_magnitude {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ell: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if *ell == f64::NEG_INFINITY {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(ell)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NEG_INFINITY))
    }
}

fn safe_ln(x: f64) -> f64 {
    if x <= 0.0 {
        f64::NEG_INFINITY
    } else {
        x.ln()
    }
}

/// `log(1 + exp(x))` without overflow or cancellation.
pub fn log1pexp(x: f64) -> f64 {
    if x <= -37.0 {
        x.exp()
    } else if x <= 18.0 {
        x.exp().ln_1p()
    } else if x <= 33.3 {
        x + (-x).exp()
    } else {
        x
    }
}

/// `log(1 - exp(x))` for `x <= 0`; `-inf` at `x = 0`.
pub fn log1mexp(x: f64) -> f64 {
    let a = -x;
    if a <= 0.0 {
        f64::NEG_INFINITY
    } else if a <= std::f64::consts::LN_2 {
        safe_ln(-(-a).exp_m1())
    } else {
        (-(-a).exp()).ln_1p()
    }
}
