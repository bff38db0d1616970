use rand::Rng;
use shg_core::errors::{graph_error, HyperError};
use shg_core::rng::RngHandle;

use crate::config::HypergraphConfig;
use crate::hypergraph::Hypergraph;

/// Shape of a random layered forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestShape {
    /// Number of layers above the terminals; the root sits alone on top.
    pub layers: usize,
    /// Nodes per intermediate layer and number of terminals.
    pub width: usize,
    /// Incoming edges generated for every non-terminal node.
    pub edges_per_node: usize,
    /// Largest tail drawn for a generated edge.
    pub max_arity: usize,
}

impl Default for ForestShape {
    fn default() -> Self {
        Self {
            layers: 3,
            width: 3,
            edges_per_node: 2,
            max_arity: 2,
        }
    }
}

/// Generates a random acyclic forest over `(layer, index)` nodes.
///
/// Layer 0 holds terminals, each with one empty-tail edge of weight 1. Every
/// node of layer `l > 0` draws its tails from layer `l - 1`, with weights in
/// `[0.1, 1)`. The root is `(layers, 0)`.
pub fn gen_layered_forest(
    shape: &ForestShape,
    rng: &mut RngHandle,
) -> Result<Hypergraph<(usize, usize), f64>, HyperError> {
    if shape.layers == 0 || shape.width == 0 || shape.edges_per_node == 0 || shape.max_arity == 0 {
        return Err(graph_error(
            "empty-graph",
            "layered forest requires at least one layer, node, edge and tail",
        )
        .with_context("layers", shape.layers)
        .with_context("width", shape.width));
    }
    let config = HypergraphConfig {
        max_arity: Some(shape.max_arity),
        ..HypergraphConfig::default()
    };
    let mut graph = Hypergraph::new(config);
    graph.set_root((shape.layers, 0));

    for index in 0..shape.width {
        graph.edge(1.0, (0, index), [])?;
    }
    for layer in 1..=shape.layers {
        let width = if layer == shape.layers { 1 } else { shape.width };
        for index in 0..width {
            for _ in 0..shape.edges_per_node {
                let arity = rng.gen_range(1..=shape.max_arity);
                let tail: Vec<(usize, usize)> = (0..arity)
                    .map(|_| (layer - 1, rng.gen_range(0..shape.width)))
                    .collect();
                let weight = rng.gen_range(0.1..1.0);
                graph.edge(weight, (layer, index), tail)?;
            }
        }
    }
    Ok(graph)
}

/// Generates a unary chain `depth ← depth-1 ← … ← 0`.
///
/// Every level has `branching` parallel edges of weight `1 / branching`, so
/// the inside value stays one at any depth.
pub fn gen_chain(depth: usize, branching: usize) -> Result<Hypergraph<usize, f64>, HyperError> {
    if branching == 0 {
        return Err(graph_error("empty-graph", "chain requires at least one edge per level"));
    }
    let weight = 1.0 / branching as f64;
    let mut graph = Hypergraph::with_root(depth);
    graph.edge(1.0, 0, [])?;
    for level in 1..=depth {
        for _ in 0..branching {
            graph.edge(weight, level, [level - 1])?;
        }
    }
    Ok(graph)
}
