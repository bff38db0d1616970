#![deny(missing_docs)]

//! Core algebra and shared types for the semiring hypergraph engine.
//!
//! Everything a traversal needs to know about edge weights lives here: the
//! [`Semiring`] contract and its optional extensions, the numerically stable
//! [`LogSpace`] scalar, a handful of further concrete semirings, the shared
//! [`HyperError`] type and the deterministic [`RngHandle`].

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod logspace;
pub mod rng;
pub mod semiring;
pub mod semirings;

pub use errors::{ErrorInfo, HyperError};
pub use logspace::LogSpace;
pub use rng::{derive_substream_seed, RngHandle};
pub use semiring::{DivisionSemiring, Module, Semiring, StarSemiring, ToReal};
pub use semirings::{Count, Expectation, MaxTimes, MinPlus, SecondOrderExpectation};

/// Identifier for a hyperedge within a hypergraph.
///
/// Identifiers are dense insertion indices; graphs produced by pruning or by
/// re-weighting renumber their edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }

    /// Creates an identifier from an arena index.
    pub fn from_index(index: usize) -> Self {
        Self(index as u64)
    }

    /// Position of the edge in its graph's arena.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}
