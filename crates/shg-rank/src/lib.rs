#![deny(missing_docs)]

//! Lazy k-best enumeration over weighted hypergraphs.
//!
//! [`LazyRank`] is a semiring whose elements are descending streams of
//! scored derivations. Running the ordinary inside pass with it builds a
//! small graph of deferred merges and products; pulling `k` items from the
//! root yields the `k` best derivations without enumerating the rest.

mod kbest;
mod lazy;
mod stream;

pub use kbest::{decode, kbest, sorted};
pub use lazy::{LazyRank, Payload};
pub use stream::{RankIter, Ranked};
