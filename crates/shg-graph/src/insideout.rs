//! Inside and outside passes over a hypergraph.
//!
//! `inside` folds every derivation of a node into one semiring value, bottom
//! up. `outside` folds every context a node can appear in, top down, given the
//! inside chart. Together they give marginals: `B[x] ⊗ A[x] / B[root]`,
//! and [`insideout`] sums any edge-local quantity over all derivations.

use std::fmt::Debug;

use shg_core::errors::{ErrorInfo, HyperError};
use shg_core::{Module, Semiring};
use tracing::debug;

use crate::chart::Chart;
use crate::config::OutsideStrategy;
use crate::hypergraph::{Edge, Hypergraph};

/// Inside and outside charts computed from the same graph.
#[derive(Debug, Clone)]
pub struct InsideOutside<N, W> {
    /// Bottom-up chart `B`.
    pub inside: Chart<N, W>,
    /// Top-down chart `A`.
    pub outside: Chart<N, W>,
    /// Inside value of the root, `Z`.
    pub total: W,
}

/// Bottom-up pass: `B[x] = ⊕_e weight(e) ⊗ B[t₁] ⊗ … ⊗ B[tₙ]`.
///
/// Nodes without incoming edges keep the value zero; give terminals an
/// empty-tail edge to assign them a base value.
pub fn inside<N, W>(graph: &Hypergraph<N, W>) -> Result<Chart<N, W>, HyperError>
where
    N: Clone + Ord + Debug,
    W: Semiring,
{
    let order = graph.toposort()?;
    let mut chart = Chart::new();
    for node in &order {
        let mut value = W::zero();
        for edge in graph.incoming(node) {
            value.add_assign(&edge_inside(edge, &chart));
        }
        chart.set(node.clone(), value);
    }
    debug!(nodes = order.len(), edges = graph.len(), "inside pass complete");
    Ok(chart)
}

/// `weight(e) ⊗ B[t₁] ⊗ … ⊗ B[tₙ]`, left to right.
pub(crate) fn edge_inside<N, W>(edge: &Edge<N, W>, chart: &Chart<N, W>) -> W
where
    N: Ord,
    W: Semiring,
{
    edge.weight().mul_all(edge.tail().iter().map(|t| chart.get(t)))
}

/// Top-down pass seeded with `A[root] = 1`.
///
/// For every edge `x ← (t₁ … tₙ)` and tail position `i`,
/// `A[tᵢ] ⊕= A[x] ⊗ weight ⊗ ∏_{j≠i} B[tⱼ]`. Products are taken over tail
/// positions, so a node repeated in one tail receives one contribution per
/// position. Requires a commutative ⊗.
pub fn outside<N, W>(
    graph: &Hypergraph<N, W>,
    inside: &Chart<N, W>,
) -> Result<Chart<N, W>, HyperError>
where
    N: Clone + Ord + Debug,
    W: Semiring,
{
    if !W::COMMUTATIVE {
        return Err(HyperError::Unsupported(
            ErrorInfo::new(
                "non-commutative-outside",
                "outside pass requires a commutative multiplication",
            )
            .with_context("semiring", W::NAME),
        ));
    }
    let root = graph.require_root()?.clone();
    let order = graph.toposort()?;
    let strategy = graph.config().outside;

    let mut chart = Chart::new();
    chart.set(root, W::one());
    for node in order.iter().rev() {
        let context = chart.get(node).clone();
        if context.is_zero() {
            continue;
        }
        for edge in graph.incoming(node) {
            let base = context.mul(edge.weight());
            let tail = edge.tail();
            let contributions = match strategy {
                OutsideStrategy::Naive => naive_contributions(&base, tail, inside),
                OutsideStrategy::PrefixSuffix => prefix_suffix_contributions(&base, tail, inside),
            };
            for (child, value) in tail.iter().zip(contributions) {
                chart.accumulate(child.clone(), &value);
            }
        }
    }
    debug!(nodes = order.len(), ?strategy, "outside pass complete");
    Ok(chart)
}

fn naive_contributions<N: Ord, W: Semiring>(base: &W, tail: &[N], inside: &Chart<N, W>) -> Vec<W> {
    (0..tail.len())
        .map(|i| {
            let siblings = tail
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, t)| inside.get(t));
            base.mul_all(siblings)
        })
        .collect()
}

fn prefix_suffix_contributions<N: Ord, W: Semiring>(
    base: &W,
    tail: &[N],
    inside: &Chart<N, W>,
) -> Vec<W> {
    let n = tail.len();
    // prefix[i] = base ⊗ B[t₀] ⊗ … ⊗ B[tᵢ₋₁]
    let mut prefix = Vec::with_capacity(n);
    let mut acc = base.clone();
    for t in tail {
        prefix.push(acc.clone());
        acc = acc.mul(inside.get(t));
    }
    // suffix[i] = B[tᵢ₊₁] ⊗ … ⊗ B[tₙ₋₁]
    let mut suffix = vec![W::one(); n];
    let mut acc = W::one();
    for i in (0..n).rev() {
        suffix[i] = acc.clone();
        acc = inside.get(&tail[i]).mul(&acc);
    }
    prefix
        .into_iter()
        .zip(suffix)
        .map(|(left, right)| left.mul(&right))
        .collect()
}

/// Sums `x(e) · (A[head] ⊗ B[t₁] ⊗ … ⊗ B[tₙ])` over every edge.
///
/// `x` maps an edge to an element of any right module over the chart
/// semiring; it should already include the edge's own weight. With
/// `x(e) = weight(e) ⊗ r(e)` the result is `Σ_d p(d) · Σ_{e ∈ d} r(e)`,
/// the unnormalized expectation of an additive edge quantity. Running the
/// charts in a first-order expectation semiring yields second-order
/// quantities without carrying them through the whole traversal.
pub fn insideout<N, W, M, F>(
    graph: &Hypergraph<N, W>,
    inside: &Chart<N, W>,
    outside: &Chart<N, W>,
    mut x: F,
) -> M
where
    N: Clone + Ord + Debug,
    W: Semiring,
    M: Module<W>,
    F: FnMut(&Edge<N, W>) -> M,
{
    let mut total = M::null();
    for edge in graph.edges() {
        let context = outside.get(edge.head());
        if context.is_zero() {
            continue;
        }
        let kbar = context.mul_all(edge.tail().iter().map(|t| inside.get(t)));
        total = total.plus(&x(edge).scale(&kbar));
    }
    total
}

/// Runs both passes and returns the charts together with the root total.
pub fn sum_product<N, W>(graph: &Hypergraph<N, W>) -> Result<InsideOutside<N, W>, HyperError>
where
    N: Clone + Ord + Debug,
    W: Semiring,
{
    let inside_chart = inside(graph)?;
    let outside_chart = outside(graph, &inside_chart)?;
    let total = inside_chart.get(graph.require_root()?).clone();
    Ok(InsideOutside {
        inside: inside_chart,
        outside: outside_chart,
        total,
    })
}

impl<N, W> Hypergraph<N, W>
where
    N: Clone + Ord + Debug,
    W: Semiring,
{
    /// Inside value of the root: the sum over all derivations.
    pub fn total(&self) -> Result<W, HyperError> {
        let chart = inside(self)?;
        Ok(chart.get(self.require_root()?).clone())
    }
}
