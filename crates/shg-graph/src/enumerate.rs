//! Exhaustive derivation listing and scoring.
//!
//! Exponential in general; meant as a reference for small graphs.

use std::collections::BTreeMap;
use std::fmt::Debug;

use shg_core::errors::{graph_error, HyperError};
use shg_core::Semiring;

use crate::derivation::Derivation;
use crate::hypergraph::Hypergraph;

/// Every derivation of the root, edges in insertion order and tails
/// expanded left to right.
///
/// Nodes without incoming edges have no derivations, matching the zero
/// inside value they receive.
pub fn enumerate<N, W>(graph: &Hypergraph<N, W>) -> Result<Vec<Derivation<N>>, HyperError>
where
    N: Clone + Ord + Debug,
{
    let order = graph.toposort()?;
    let mut table: BTreeMap<N, Vec<Derivation<N>>> = BTreeMap::new();
    for node in &order {
        let mut derivations = Vec::new();
        for edge in graph.incoming(node) {
            let mut partial: Vec<Vec<Derivation<N>>> = vec![Vec::new()];
            for tail in edge.tail() {
                let options = table.get(tail).map(Vec::as_slice).unwrap_or(&[]);
                partial = partial
                    .iter()
                    .flat_map(|prefix| {
                        options.iter().map(move |option| {
                            let mut extended = prefix.clone();
                            extended.push(option.clone());
                            extended
                        })
                    })
                    .collect();
            }
            derivations.extend(
                partial
                    .into_iter()
                    .map(|children| Derivation::new(node.clone(), edge.id(), children)),
            );
        }
        table.insert(node.clone(), derivations);
    }
    let root = graph.require_root()?;
    Ok(table.remove(root).unwrap_or_default())
}

/// Every derivation of the root paired with its [`score`].
pub fn enumerate_scored<N, W>(
    graph: &Hypergraph<N, W>,
) -> Result<Vec<(Derivation<N>, W)>, HyperError>
where
    N: Clone + Ord + Debug,
    W: Semiring,
{
    enumerate(graph)?
        .into_iter()
        .map(|derivation| {
            let weight = score(graph, &derivation)?;
            Ok((derivation, weight))
        })
        .collect()
}

/// Product of the edge weights of `derivation` in pre-order.
///
/// Pre-order is the order in which `inside` multiplies the same factors, so
/// the result is exact for non-commutative semirings too. Leaves without an
/// edge contribute one.
pub fn score<N, W>(graph: &Hypergraph<N, W>, derivation: &Derivation<N>) -> Result<W, HyperError>
where
    N: Clone + Ord + Debug,
    W: Semiring,
{
    let mut total = W::one();
    for part in derivation.iter() {
        let Some(id) = part.edge() else {
            continue;
        };
        let edge = graph.edge_by_id(id)?;
        if edge.head() != part.node() || edge.arity() != part.children().len() {
            return Err(graph_error(
                "derivation-mismatch",
                "derivation does not follow the edges of this graph",
            )
            .with_context("edge", id)
            .with_context("node", format!("{:?}", part.node())));
        }
        total = total.mul(edge.weight());
    }
    Ok(total)
}
