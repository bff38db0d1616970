#![deny(missing_docs)]

//! Weighted hypergraphs and the generic inside/outside traversals.
//!
//! A [`Hypergraph`] stores hyperedges `head ← tail` weighted in any
//! [`Semiring`](shg_core::Semiring). The same [`inside`] pass yields a
//! partition function, a Viterbi score or a derivation count depending on the
//! weights plugged in; [`outside`] adds the top-down contexts needed for
//! marginals.

mod chart;
mod closure;
mod config;
mod derivation;
mod enumerate;
mod generators;
mod hypergraph;
mod insideout;
mod marginals;
mod serialization;

pub use chart::Chart;
pub use closure::kleene;
pub use config::{HypergraphConfig, OutsideStrategy, SchemaVersion};
pub use derivation::{Derivation, PreOrder};
pub use enumerate::{enumerate, enumerate_scored, score};
pub use generators::{gen_chain, gen_layered_forest, ForestShape};
pub use hypergraph::{Edge, Hypergraph};
pub use insideout::{inside, insideout, outside, sum_product, InsideOutside};
pub use marginals::{edge_marginals, marginals, node_marginals, normalized};

/// Re-export serialization helpers for downstream crates.
pub use serialization::{
    graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json, SNAPSHOT_SCHEMA,
};
