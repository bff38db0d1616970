use std::fmt::Debug;
use std::rc::Rc;

use shg_core::errors::{graph_error, HyperError};
use shg_core::{EdgeId, ToReal};
use shg_graph::{Derivation, Hypergraph};
use tracing::debug;

use crate::lazy::{LazyRank, Payload};

/// Root inside value of `graph` under the ranking semiring.
///
/// Every edge becomes a leaf scored by its weight and carrying its id; the
/// result iterates over all derivations of the root, best first. Weights
/// must be non-negative numbers.
pub fn sorted<N, W>(graph: &Hypergraph<N, W>) -> Result<LazyRank<EdgeId>, HyperError>
where
    N: Clone + Ord + Debug,
    W: ToReal,
{
    if let Some(edge) = graph.edges().iter().find(|edge| {
        let score = edge.weight().to_real();
        score.is_nan() || score < 0.0
    }) {
        return Err(graph_error(
            "negative-score",
            "ranking requires non-negative edge scores",
        )
        .with_context("edge", edge.id())
        .with_context("score", edge.weight().to_real()));
    }
    let ranked = graph.apply(|edge| Some(LazyRank::leaf(edge.weight().to_real(), edge.id())));
    ranked.total()
}

/// The `k` best derivations of the root with their scores, best first.
///
/// Fewer than `k` are returned when the graph has fewer derivations.
pub fn kbest<N, W>(
    graph: &Hypergraph<N, W>,
    k: usize,
) -> Result<Vec<(f64, Derivation<N>)>, HyperError>
where
    N: Clone + Ord + Debug,
    W: ToReal,
{
    let root = sorted(graph)?;
    let best = root
        .iter()
        .take(k)
        .map(|(score, payload)| Ok((score, decode(graph, &payload)?)))
        .collect::<Result<Vec<_>, HyperError>>()?;
    debug!(requested = k, found = best.len(), "k-best extraction complete");
    Ok(best)
}

struct Pending<N> {
    node: N,
    edge: EdgeId,
    parts: Vec<Rc<Payload<EdgeId>>>,
    children: Vec<Derivation<N>>,
}

/// Rebuilds the derivation encoded by a payload of [`sorted`].
///
/// Inside multiplies `leaf(e) ⊗ B[t₁] ⊗ … ⊗ B[tₙ]` left to right, so the
/// payload of an edge is a left spine of pairs ending in `Item(e)` with the
/// tail payloads on the right, in order.
pub fn decode<N, W>(
    graph: &Hypergraph<N, W>,
    payload: &Rc<Payload<EdgeId>>,
) -> Result<Derivation<N>, HyperError>
where
    N: Clone + Ord + Debug,
{
    let mut stack = vec![open(graph, payload, None)?];
    loop {
        let Some(top) = stack.last_mut() else {
            return Err(graph_error("payload-shape", "empty payload"));
        };
        if top.children.len() < top.parts.len() {
            let index = top.children.len();
            let part = Rc::clone(&top.parts[index]);
            let expected = graph.edge_by_id(top.edge)?.tail()[index].clone();
            let child = open(graph, &part, Some(&expected))?;
            stack.push(child);
            continue;
        }
        let Some(done) = stack.pop() else {
            continue;
        };
        let derivation = Derivation::new(done.node, done.edge, done.children);
        match stack.last_mut() {
            Some(parent) => parent.children.push(derivation),
            None => return Ok(derivation),
        }
    }
}

fn open<N, W>(
    graph: &Hypergraph<N, W>,
    payload: &Rc<Payload<EdgeId>>,
    expected: Option<&N>,
) -> Result<Pending<N>, HyperError>
where
    N: Clone + Ord + Debug,
{
    let mut parts = Vec::new();
    let mut cursor = payload;
    while let Payload::Pair(left, right) = cursor.as_ref() {
        parts.push(Rc::clone(right));
        cursor = left;
    }
    let Payload::Item(id) = cursor.as_ref() else {
        return Err(graph_error("payload-shape", "payload spine does not end in an edge"));
    };
    parts.reverse();
    let edge = graph.edge_by_id(*id)?;
    let head_matches = expected.map_or(true, |node| node == edge.head());
    if !head_matches || edge.arity() != parts.len() {
        return Err(graph_error("payload-shape", "payload does not match the graph")
            .with_context("edge", id)
            .with_context("arity", edge.arity())
            .with_context("parts", parts.len()));
    }
    Ok(Pending {
        node: edge.head().clone(),
        edge: *id,
        parts,
        children: Vec::new(),
    })
}
