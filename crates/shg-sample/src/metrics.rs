use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shg_core::{EdgeId, Semiring, ToReal};
use shg_graph::{Chart, Derivation};

/// Average number of occurrences of every node per derivation.
///
/// For a node that appears at most once per derivation this is the
/// frequency with which it appears, comparable to `B[x] ⊗ A[x] / Z`.
pub fn empirical_marginals<N: Clone + Ord>(derivations: &[Derivation<N>]) -> BTreeMap<N, f64> {
    let mut counts: BTreeMap<N, f64> = BTreeMap::new();
    for derivation in derivations {
        for node in derivation.nodes() {
            *counts.entry(node.clone()).or_insert(0.0) += 1.0;
        }
    }
    normalize(counts, derivations.len())
}

/// Average number of uses of every edge per derivation.
pub fn edge_frequencies<N>(derivations: &[Derivation<N>]) -> BTreeMap<EdgeId, f64> {
    let mut counts: BTreeMap<EdgeId, f64> = BTreeMap::new();
    for derivation in derivations {
        for edge in derivation.edges() {
            *counts.entry(edge).or_insert(0.0) += 1.0;
        }
    }
    normalize(counts, derivations.len())
}

fn normalize<K: Ord>(mut counts: BTreeMap<K, f64>, draws: usize) -> BTreeMap<K, f64> {
    if draws > 0 {
        for value in counts.values_mut() {
            *value /= draws as f64;
        }
    }
    counts
}

/// Agreement between sampled frequencies and exact marginals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginalReport {
    /// Number of derivations the frequencies were measured on.
    pub draws: usize,
    /// Largest absolute difference over all nodes of either side.
    pub max_abs_error: f64,
    /// Node (in debug form) where the largest difference occurred.
    pub worst_node: Option<String>,
}

/// Compares sampled node frequencies with normalized exact marginals.
pub fn compare_marginals<N, W>(
    derivations: &[Derivation<N>],
    exact: &Chart<N, W>,
) -> MarginalReport
where
    N: Clone + Ord + std::fmt::Debug,
    W: Semiring + ToReal,
{
    let empirical = empirical_marginals(derivations);
    let mut report = MarginalReport {
        draws: derivations.len(),
        max_abs_error: 0.0,
        worst_node: None,
    };
    let mut consider = |node: &N, error: f64| {
        if error > report.max_abs_error {
            report.max_abs_error = error;
            report.worst_node = Some(format!("{node:?}"));
        }
    };
    for (node, value) in exact {
        let observed = empirical.get(node).copied().unwrap_or(0.0);
        consider(node, (value.to_real() - observed).abs());
    }
    for (node, observed) in &empirical {
        if !exact.contains(node) {
            consider(node, observed.abs());
        }
    }
    report
}
