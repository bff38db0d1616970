//! The algebraic contract every edge weight satisfies.
//!
//! A semiring (W, ⊕, ⊗, 0, 1) provides:
//! - a commutative additive monoid (W, ⊕, 0)
//! - a multiplicative monoid (W, ⊗, 1), not necessarily commutative
//! - ⊗ distributes over ⊕
//! - 0 annihilates: 0 ⊗ x = x ⊗ 0 = 0
//!
//! Traversals are generic over [`Semiring`], so combining weights of two
//! different semirings is rejected by the compiler. The only runtime
//! boundary where that can still happen is restoring a serialized graph,
//! which checks [`Semiring::NAME`].

use std::fmt::Debug;

/// A semiring whose elements weight hyperedges.
pub trait Semiring: Clone + Debug {
    /// Stable name recorded in serialized snapshots.
    const NAME: &'static str;

    /// Whether ⊗ is commutative. Outside passes require it.
    const COMMUTATIVE: bool = true;

    /// Additive identity: x ⊕ 0 = 0 ⊕ x = x
    fn zero() -> Self;

    /// Multiplicative identity: x ⊗ 1 = 1 ⊗ x = x
    fn one() -> Self;

    /// Semiring addition (⊕)
    fn add(&self, other: &Self) -> Self;

    /// Semiring multiplication (⊗)
    fn mul(&self, other: &Self) -> Self;

    /// Check if this is the additive identity
    fn is_zero(&self) -> bool;

    /// Check if this is the multiplicative identity.
    ///
    /// Only used to skip work, so `false` is always a safe answer.
    fn is_one(&self) -> bool {
        false
    }

    /// In-place accumulation, `self ← self ⊕ other`.
    fn add_assign(&mut self, other: &Self) {
        *self = self.add(other);
    }

    /// Folds ⊗ over `factors` left to right, seeded with `self`.
    fn mul_all<'a, I>(&self, factors: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        let mut acc = self.clone();
        for factor in factors {
            if acc.is_zero() {
                break;
            }
            acc = acc.mul(factor);
        }
        acc
    }
}

/// Semirings with a Kleene star: `a* = 1 ⊕ a ⊗ a*`.
///
/// Used by closure over weighted adjacency matrices, never by the DAG
/// traversals.
pub trait StarSemiring: Semiring {
    /// The closure `1 ⊕ a ⊕ a² ⊕ …`.
    fn star(&self) -> Self;
}

/// Semirings supporting division, used to normalize marginals.
///
/// Dividing by zero yields zero rather than an error.
pub trait DivisionSemiring: Semiring {
    /// `self / other`
    fn div(&self, other: &Self) -> Self;
}

/// Conversion to an ordinary real number at output boundaries.
pub trait ToReal {
    /// Materializes the value as an `f64`.
    fn to_real(&self) -> f64;
}

/// Values that a semiring `K` can scale from the right: a right `K`-module.
///
/// Scaling distributes over addition, `(x₁ + x₂)·k = x₁·k + x₂·k`. Every
/// semiring is a module over itself.
pub trait Module<K: Semiring>: Clone + Debug {
    /// The empty accumulator.
    fn null() -> Self;

    /// Vector addition.
    fn plus(&self, other: &Self) -> Self;

    /// Right scaling `self · k`.
    fn scale(&self, k: &K) -> Self;
}

impl<K: Semiring> Module<K> for K {
    fn null() -> Self {
        K::zero()
    }

    fn plus(&self, other: &Self) -> Self {
        self.add(other)
    }

    fn scale(&self, k: &K) -> Self {
        self.mul(k)
    }
}
