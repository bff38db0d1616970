#![deny(missing_docs)]

//! Exact ancestral sampling of derivations from weighted hypergraphs.
//!
//! Given the inside chart of a graph, [`sample`] draws a derivation of the
//! root with probability proportional to its weight. [`Sampler`] wraps the
//! chart and a master seed so that batches of draws are reproducible.

mod config;
mod determinism;
mod metrics;
mod sampler;

pub use config::{SamplerConfig, SeedPolicy};
pub use determinism::draw_seed;
pub use metrics::{compare_marginals, edge_frequencies, empirical_marginals, MarginalReport};
pub use sampler::{sample, Sampler};
