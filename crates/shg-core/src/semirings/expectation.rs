//! Expectation semirings (Eisner 2002; Li & Eisner 2009).
//!
//! Edges are weighted `(p_e, p_e · r_e)` where `r_e` is an additive quantity
//! local to the edge. The inside value of the root is then
//! `(Z, Σ_d p(d) · r(d))`, so `r / p` is the expected value of `r` under the
//! derivation distribution. The second-order variant carries a second
//! quantity `s` and the expected product `r · s`.

use serde::{Deserialize, Serialize};

use crate::semiring::{DivisionSemiring, Semiring};

/// Pair `(p, r)` with `(p₁, r₁) ⊗ (p₂, r₂) = (p₁p₂, p₁r₂ + p₂r₁)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Expectation<P> {
    /// Probability mass.
    pub p: P,
    /// Mass-weighted accumulated quantity.
    pub r: P,
}

impl<P: Semiring> Expectation<P> {
    /// Creates an element from its two components.
    pub fn new(p: P, r: P) -> Self {
        Self { p, r }
    }

    /// Edge weight for an edge with mass `p` carrying quantity `r`.
    pub fn edge(p: P, r: &P) -> Self {
        let pr = p.mul(r);
        Self { p, r: pr }
    }
}

impl<P: DivisionSemiring> Expectation<P> {
    /// Normalized expectation `r / p`.
    pub fn expected(&self) -> P {
        self.r.div(&self.p)
    }
}

impl<P: Semiring> Semiring for Expectation<P> {
    const NAME: &'static str = "expectation";
    const COMMUTATIVE: bool = P::COMMUTATIVE;

    fn zero() -> Self {
        Self {
            p: P::zero(),
            r: P::zero(),
        }
    }

    fn one() -> Self {
        Self {
            p: P::one(),
            r: P::zero(),
        }
    }

    fn add(&self, other: &Self) -> Self {
        Self {
            p: self.p.add(&other.p),
            r: self.r.add(&other.r),
        }
    }

    fn mul(&self, other: &Self) -> Self {
        Self {
            p: self.p.mul(&other.p),
            r: self.p.mul(&other.r).add(&other.p.mul(&self.r)),
        }
    }

    fn is_zero(&self) -> bool {
        self.p.is_zero() && self.r.is_zero()
    }

    fn is_one(&self) -> bool {
        self.p.is_one() && self.r.is_zero()
    }
}

/// Quadruple `(p, r, s, t)` accumulating `Σ p(d)`, `Σ p(d)·r(d)`,
/// `Σ p(d)·s(d)` and `Σ p(d)·r(d)·s(d)` over derivations.
///
/// ```text
/// (p₁, r₁, s₁, t₁) ⊗ (p₂, r₂, s₂, t₂) =
///     (p₁p₂, p₁r₂ + p₂r₁, p₁s₂ + p₂s₁, p₁t₂ + p₂t₁ + r₁s₂ + r₂s₁)
/// ```
///
/// Inside-outside with [`Expectation`] charts and a module-valued edge
/// function reaches the same `s` and `t` with less memory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecondOrderExpectation<P> {
    /// Probability mass.
    pub p: P,
    /// Mass-weighted first quantity.
    pub r: P,
    /// Mass-weighted second quantity.
    pub s: P,
    /// Mass-weighted product of both quantities.
    pub t: P,
}

impl<P: Semiring> SecondOrderExpectation<P> {
    /// Creates an element from its four components.
    pub fn new(p: P, r: P, s: P, t: P) -> Self {
        Self { p, r, s, t }
    }

    /// Edge weight `(p, p·r, p·s, p·r·s)` for an edge with mass `p` carrying
    /// quantities `r` and `s`.
    pub fn edge(p: P, r: &P, s: &P) -> Self {
        let pr = p.mul(r);
        let ps = p.mul(s);
        let prs = pr.mul(s);
        Self {
            p,
            r: pr,
            s: ps,
            t: prs,
        }
    }
}

impl<P: DivisionSemiring> SecondOrderExpectation<P> {
    /// Expected values of `r`, `s` and `r · s`.
    pub fn expected(&self) -> (P, P, P) {
        (self.r.div(&self.p), self.s.div(&self.p), self.t.div(&self.p))
    }
}

impl<P: Semiring> Semiring for SecondOrderExpectation<P> {
    const NAME: &'static str = "second-order-expectation";
    const COMMUTATIVE: bool = P::COMMUTATIVE;

    fn zero() -> Self {
        Self {
            p: P::zero(),
            r: P::zero(),
            s: P::zero(),
            t: P::zero(),
        }
    }

    fn one() -> Self {
        Self {
            p: P::one(),
            r: P::zero(),
            s: P::zero(),
            t: P::zero(),
        }
    }

    fn add(&self, other: &Self) -> Self {
        Self {
            p: self.p.add(&other.p),
            r: self.r.add(&other.r),
            s: self.s.add(&other.s),
            t: self.t.add(&other.t),
        }
    }

    fn mul(&self, other: &Self) -> Self {
        let t = self
            .p
            .mul(&other.t)
            .add(&other.p.mul(&self.t))
            .add(&self.r.mul(&other.s))
            .add(&other.r.mul(&self.s));
        Self {
            p: self.p.mul(&other.p),
            r: self.p.mul(&other.r).add(&other.p.mul(&self.r)),
            s: self.p.mul(&other.s).add(&other.p.mul(&self.s)),
            t,
        }
    }

    fn is_zero(&self) -> bool {
        self.p.is_zero() && self.r.is_zero() && self.s.is_zero() && self.t.is_zero()
    }

    fn is_one(&self) -> bool {
        self.p.is_one() && self.r.is_zero() && self.s.is_zero() && self.t.is_zero()
    }
}
