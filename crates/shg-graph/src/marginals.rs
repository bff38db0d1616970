use std::collections::BTreeMap;
use std::fmt::Debug;

use shg_core::errors::HyperError;
use shg_core::{DivisionSemiring, EdgeId, Semiring};

use crate::chart::Chart;
use crate::hypergraph::Hypergraph;
use crate::insideout::{edge_inside, sum_product};

/// Unnormalized node marginals `B[x] ⊗ A[x]` for every node of the graph.
pub fn node_marginals<N, W>(
    graph: &Hypergraph<N, W>,
    inside: &Chart<N, W>,
    outside: &Chart<N, W>,
) -> Chart<N, W>
where
    N: Clone + Ord + Debug,
    W: Semiring,
{
    graph
        .nodes()
        .into_iter()
        .map(|node| {
            let value = inside.get(&node).mul(outside.get(&node));
            (node, value)
        })
        .collect()
}

/// Unnormalized edge marginals `A[head] ⊗ weight ⊗ ∏ B[tail]`.
pub fn edge_marginals<N, W>(
    graph: &Hypergraph<N, W>,
    inside: &Chart<N, W>,
    outside: &Chart<N, W>,
) -> BTreeMap<EdgeId, W>
where
    N: Clone + Ord + Debug,
    W: Semiring,
{
    graph
        .edges()
        .iter()
        .map(|edge| {
            let value = outside.get(edge.head()).mul(&edge_inside(edge, inside));
            (edge.id(), value)
        })
        .collect()
}

/// Divides every entry by `total`. Division by zero yields zero.
pub fn normalized<N, W>(chart: &Chart<N, W>, total: &W) -> Chart<N, W>
where
    N: Clone + Ord,
    W: DivisionSemiring,
{
    chart
        .iter()
        .map(|(node, value)| (node.clone(), value.div(total)))
        .collect()
}

/// Posterior probability of every node appearing in a derivation of the root.
pub fn marginals<N, W>(graph: &Hypergraph<N, W>) -> Result<Chart<N, W>, HyperError>
where
    N: Clone + Ord + Debug,
    W: DivisionSemiring,
{
    let passes = sum_product(graph)?;
    let unnormalized = node_marginals(graph, &passes.inside, &passes.outside);
    Ok(normalized(&unnormalized, &passes.total))
}
