use std::collections::BTreeSet;

use shg_core::errors::HyperError;
use shg_core::{EdgeId, MaxTimes, Semiring};
use shg_graph::{enumerate_scored, gen_chain, inside, outside, score, Hypergraph};
use shg_rank::{kbest, sorted, LazyRank, Payload};

fn scenario() -> Hypergraph<&'static str, f64> {
    let mut graph = Hypergraph::with_root("R");
    graph.edge(0.6, "R", ["A", "B"]).unwrap();
    graph.edge(0.4, "R", ["C"]).unwrap();
    for terminal in ["A", "B", "C"] {
        graph.edge(1.0, terminal, []).unwrap();
    }
    graph
}

fn grammar() -> Hypergraph<&'static str, f64> {
    let mut graph = Hypergraph::with_root("S");
    graph.edge(0.7, "S", ["NP", "VP"]).unwrap();
    graph.edge(0.3, "S", ["X"]).unwrap();
    graph.edge(0.6, "NP", ["a"]).unwrap();
    graph.edge(0.4, "NP", ["a", "b"]).unwrap();
    graph.edge(0.5, "VP", ["b"]).unwrap();
    graph.edge(0.5, "VP", ["NP", "b"]).unwrap();
    graph.edge(1.0, "X", ["NP", "NP"]).unwrap();
    graph.edge(1.0, "a", []).unwrap();
    graph.edge(0.9, "b", []).unwrap();
    graph
}

#[test]
fn scenario_top_one_is_the_binary_edge() {
    let graph = scenario();
    let best = kbest(&graph, 1).unwrap();
    assert_eq!(best.len(), 1);
    let (score, derivation) = &best[0];
    assert!((score - 0.6).abs() < 1e-12);
    assert_eq!(*derivation.node(), "R");
    assert_eq!(derivation.edge(), Some(EdgeId::from_raw(0)));
    let children: Vec<_> = derivation.children().iter().map(|c| *c.node()).collect();
    assert_eq!(children, vec!["A", "B"]);

    let all = kbest(&graph, 10).unwrap();
    assert_eq!(all.len(), 2);
    assert!((all[1].0 - 0.4).abs() < 1e-12);
}

#[test]
fn scores_are_non_increasing_and_start_at_viterbi() {
    let graph = grammar();
    let best = kbest(&graph, 50).unwrap();
    assert!(!best.is_empty());
    for pair in best.windows(2) {
        assert!(pair[0].0 >= pair[1].0, "{} before {}", pair[0].0, pair[1].0);
    }
    let viterbi = graph.apply(|e| Some(MaxTimes(*e.weight()))).total().unwrap();
    assert!((best[0].0 - viterbi.0).abs() < 1e-12);
}

#[test]
fn full_enumeration_matches_brute_force() {
    let graph = grammar();
    let mut expected = enumerate_scored(&graph).unwrap();
    let found = kbest(&graph, expected.len() + 5).unwrap();
    assert_eq!(found.len(), expected.len());

    let expected_edges: BTreeSet<Vec<EdgeId>> = expected
        .iter()
        .map(|(d, _)| d.edges().collect())
        .collect();
    let found_edges: BTreeSet<Vec<EdgeId>> =
        found.iter().map(|(_, d)| d.edges().collect()).collect();
    assert_eq!(found_edges.len(), found.len(), "duplicate derivations");
    assert_eq!(found_edges, expected_edges);

    expected.sort_by(|a, b| b.1.total_cmp(&a.1));
    for ((score_found, derivation), (_, score_expected)) in found.iter().zip(&expected) {
        assert!((score_found - score_expected).abs() < 1e-12);
        let rescored = score(&graph, derivation).unwrap();
        assert!((rescored - score_found).abs() < 1e-12);
    }
}

#[test]
fn iteration_is_restartable() {
    let root = sorted(&grammar()).unwrap();
    let first: Vec<f64> = root.iter().map(|(s, _)| s).collect();
    let second: Vec<f64> = root.iter().map(|(s, _)| s).collect();
    assert_eq!(first, second);
    assert_eq!(root.top(3).len(), 3);
}

#[test]
fn empty_graph_yields_zero() {
    let graph: Hypergraph<&str, f64> = Hypergraph::with_root("S");
    let root = sorted(&graph).unwrap();
    assert!(root.is_zero());
    assert_eq!(root.iter().count(), 0);
    assert!(kbest(&graph, 3).unwrap().is_empty());
}

#[test]
fn negative_and_nan_scores_are_rejected() {
    let mut graph = scenario();
    graph.edge(-0.1, "R", ["A"]).unwrap();
    let err = kbest(&graph, 1).unwrap_err();
    assert!(matches!(err, HyperError::Graph(ref info) if info.code == "negative-score"));

    let mut graph = scenario();
    graph.edge(f64::NAN, "R", ["A"]).unwrap();
    assert_eq!(sorted(&graph).unwrap_err().code(), "negative-score");
}

#[test]
fn outside_is_unsupported_for_ranking() {
    let graph = scenario().apply(|e| Some(LazyRank::leaf(*e.weight(), e.id())));
    let chart = inside(&graph).unwrap();
    let err = outside(&graph, &chart).unwrap_err();
    assert!(matches!(err, HyperError::Unsupported(ref info) if info.context["semiring"] == "lazy-rank"));
}

#[test]
fn leaf_products_collapse_with_nested_payloads() {
    let a = LazyRank::leaf(0.5, 'a');
    let b = LazyRank::leaf(0.4, 'b');
    let c = LazyRank::leaf(0.3, 'c');
    let product = a.mul(&b).mul(&c);
    let items = product.top(5);
    assert_eq!(items.len(), 1);
    assert!((items[0].0 - 0.06).abs() < 1e-12);
    assert_eq!(items[0].1.items(), vec![&'a', &'b', &'c']);
    match items[0].1.as_ref() {
        Payload::Pair(left, right) => {
            assert!(matches!(left.as_ref(), Payload::Pair(..)));
            assert_eq!(right.as_ref(), &Payload::Item('c'));
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[test]
fn merge_prefers_left_on_ties() {
    let left = LazyRank::leaf(0.5, "left");
    let right = LazyRank::leaf(0.5, "right");
    let items = left.add(&right).top(2);
    assert_eq!(items[0].1.items(), vec![&"left"]);
    assert_eq!(items[1].1.items(), vec![&"right"]);
}

#[test]
fn identities_behave() {
    let x = LazyRank::leaf(0.25, 1u8).add(&LazyRank::leaf(0.5, 2u8));
    let scores = |r: &LazyRank<u8>| r.iter().map(|(s, _)| s).collect::<Vec<_>>();
    assert_eq!(scores(&x.mul(&LazyRank::one())), vec![0.5, 0.25]);
    assert_eq!(scores(&LazyRank::one().mul(&x)), vec![0.5, 0.25]);
    assert_eq!(scores(&x.add(&LazyRank::zero())), vec![0.5, 0.25]);
    assert!(x.mul(&LazyRank::zero()).is_zero());
    assert_eq!(scores(&LazyRank::<u8>::one()), vec![1.0]);
}

#[test]
fn product_of_sums_is_sorted_and_complete() {
    let left = [0.9, 0.5, 0.1]
        .iter()
        .enumerate()
        .fold(LazyRank::zero(), |acc, (i, s)| acc.add(&LazyRank::leaf(*s, i)));
    let right = [0.8, 0.7, 0.2, 0.05]
        .iter()
        .enumerate()
        .fold(LazyRank::zero(), |acc, (i, s)| acc.add(&LazyRank::leaf(*s, 10 + i)));
    let product = left.mul(&right);
    let items: Vec<_> = product.iter().collect();
    assert_eq!(items.len(), 12);
    for pair in items.windows(2) {
        assert!(pair[0].0 >= pair[1].0);
    }
    let pairs: BTreeSet<Vec<usize>> = items
        .iter()
        .map(|(_, p)| p.items().into_iter().copied().collect())
        .collect();
    assert_eq!(pairs.len(), 12);
    assert!((items[0].0 - 0.72).abs() < 1e-12);
}

#[test]
fn shared_levels_are_ranked_once_per_stream() {
    // 2^200 tied derivations; the best one only needs each level once.
    let graph = gen_chain(200, 2).unwrap();
    let best = kbest(&graph, 1).unwrap();
    assert_eq!(best.len(), 1);
    let (score, derivation) = &best[0];
    assert_eq!(*score, 0.5f64.powi(200));
    assert_eq!(derivation.depth(), 201);
    assert_eq!(*derivation.node(), 200);
}

#[test]
fn tied_chain_derivations_are_distinct() {
    let graph = gen_chain(30, 2).unwrap();
    let best = kbest(&graph, 16).unwrap();
    assert_eq!(best.len(), 16);
    let distinct: BTreeSet<Vec<EdgeId>> = best
        .iter()
        .map(|(_, derivation)| derivation.edges().collect())
        .collect();
    assert_eq!(distinct.len(), 16);
    for (value, derivation) in &best {
        assert_eq!(*value, 0.5f64.powi(30));
        assert_eq!(*value, score(&graph, derivation).unwrap());
    }
}

#[test]
fn deep_wide_chain_streams_without_native_recursion() {
    let graph = gen_chain(20_000, 2).unwrap();
    let best = kbest(&graph, 3).unwrap();
    assert_eq!(best.len(), 3);
    for (_, derivation) in &best {
        assert_eq!(derivation.depth(), 20_001);
        assert_eq!(derivation.size(), 20_001);
    }
}

#[test]
fn shared_operand_is_read_through_separate_cursors() {
    let x = LazyRank::leaf(0.5, 1u8).add(&LazyRank::leaf(0.25, 2u8));
    let doubled: Vec<f64> = x.add(&x).iter().map(|(s, _)| s).collect();
    assert_eq!(doubled, vec![0.5, 0.5, 0.25, 0.25]);
    let squared = x.mul(&x);
    let items: Vec<Vec<u8>> = squared
        .iter()
        .map(|(_, payload)| payload.items().into_iter().copied().collect())
        .collect();
    assert_eq!(items, vec![vec![1, 1], vec![1, 2], vec![2, 1], vec![2, 2]]);
    let scores: Vec<f64> = squared.iter().map(|(s, _)| s).collect();
    assert_eq!(scores, vec![0.25, 0.125, 0.125, 0.0625]);
}
