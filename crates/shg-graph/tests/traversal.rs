use std::collections::BTreeSet;

use shg_core::errors::HyperError;
use shg_core::{Count, LogSpace};
use shg_graph::{gen_chain, inside, HypergraphConfig, Hypergraph};

fn scenario() -> Hypergraph<&'static str, f64> {
    let mut graph = Hypergraph::with_root("R");
    graph.edge(0.6, "R", ["A", "B"]).unwrap();
    graph.edge(0.4, "R", ["C"]).unwrap();
    for terminal in ["A", "B", "C"] {
        graph.edge(1.0, terminal, []).unwrap();
    }
    graph
}

#[test]
fn scenario_inside_is_one() {
    let graph = scenario();
    let chart = inside(&graph).unwrap();
    assert!((chart[&"R"] - 1.0).abs() < 1e-12);
    assert_eq!(chart[&"A"], 1.0);
    assert!((graph.total().unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn toposort_lists_tails_before_heads() {
    let graph = scenario();
    let order = graph.toposort().unwrap();
    assert_eq!(order.len(), 4);
    assert_eq!(order.last(), Some(&"R"));
    let position = |node: &str| order.iter().position(|n| *n == node).unwrap();
    for edge in graph.edges() {
        for tail in edge.tail() {
            assert!(position(tail) < position(edge.head()));
        }
    }
}

#[test]
fn toposort_skips_nodes_without_edges() {
    let mut graph = Hypergraph::with_root("R");
    graph.edge(0.5, "R", ["x"]).unwrap();
    assert_eq!(graph.toposort().unwrap(), vec!["R"]);
    assert_eq!(graph.terminals(), BTreeSet::from(["x"]));
    assert_eq!(inside(&graph).unwrap()[&"R"], 0.0);
}

#[test]
fn traversal_without_root_fails() {
    let mut graph: Hypergraph<u32, f64> = Hypergraph::default();
    graph.edge(1.0, 1, [2]).unwrap();
    let err = inside(&graph).unwrap_err();
    assert!(matches!(err, HyperError::MissingRoot(ref info) if info.code == "missing-root"));
    assert!(err.info().hint.is_some());
}

#[test]
fn cycles_are_reported() {
    let mut graph = Hypergraph::with_root("a");
    graph.edge(1.0, "a", ["b"]).unwrap();
    graph.edge(1.0, "b", ["c"]).unwrap();
    graph.edge(1.0, "c", ["a"]).unwrap();
    let err = graph.toposort().unwrap_err();
    assert!(matches!(err, HyperError::Cyclic(ref info) if info.context["node"] == "\"a\""));
}

#[test]
fn cycle_detection_can_be_disabled() {
    let config = HypergraphConfig {
        detect_cycles: false,
        ..HypergraphConfig::default()
    };
    let mut graph = Hypergraph::new(config);
    graph.set_root("a");
    graph.edge(1.0, "a", ["b"]).unwrap();
    graph.edge(1.0, "b", ["a"]).unwrap();
    let order = graph.toposort().unwrap();
    assert_eq!(order.len(), 2);
}

#[test]
fn arity_cap_rejects_long_tails() {
    let config = HypergraphConfig {
        max_arity: Some(2),
        ..HypergraphConfig::default()
    };
    let mut graph: Hypergraph<u8, f64> = Hypergraph::new(config);
    graph.edge(1.0, 0, [1, 2]).unwrap();
    let err = graph.edge(1.0, 0, [1, 2, 3]).unwrap_err();
    assert!(matches!(err, HyperError::Graph(ref info) if info.code == "arity-cap"));
    assert_eq!(graph.len(), 1);
}

#[test]
fn unknown_edge_lookup_fails() {
    let graph = scenario();
    let err = graph
        .edge_by_id(shg_core::EdgeId::from_raw(99))
        .unwrap_err();
    assert_eq!(err.code(), "unknown-edge");
}

#[test]
fn pruning_drops_unreachable_edges() {
    let mut graph = scenario();
    graph.edge(0.3, "Z", ["A"]).unwrap();
    graph.edge(0.2, "R", ["D"]).unwrap();
    let pruned = graph.prune_to_reachable().unwrap();
    assert_eq!(pruned.len(), 5);
    assert!(pruned.edges().iter().all(|e| *e.head() != "Z"));
    assert!(pruned.edges().iter().all(|e| !e.tail().contains(&"D")));
    assert_eq!(pruned.root(), Some(&"R"));

    let fixed = graph.prune_fixpoint().unwrap();
    assert_eq!(fixed.len(), pruned.len());
    assert!((fixed.total().unwrap() - graph.total().unwrap()).abs() < 1e-12);
}

#[test]
fn prune_nodes_keeps_edges_inside_the_set() {
    let graph = scenario();
    let kept = graph.prune_nodes(&BTreeSet::from(["R", "C"]));
    assert_eq!(kept.len(), 2);
    assert!((kept.total().unwrap() - 0.4).abs() < 1e-12);
}

#[test]
fn apply_maps_and_drops_edges() {
    let graph = scenario();
    let logs: Hypergraph<&str, LogSpace> = graph.apply(|e| Some(LogSpace::lift(*e.weight())));
    assert!((logs.total().unwrap().to_f64() - 1.0).abs() < 1e-12);

    let without_c = graph.apply(|e| (e.tail() != ["C"]).then_some(*e.weight()));
    assert_eq!(without_c.len(), graph.len() - 1);
    assert!((without_c.total().unwrap() - 0.6).abs() < 1e-12);

    let counts = graph.apply(|_| Some(Count(1)));
    assert_eq!(counts.total().unwrap(), Count(2));
}

#[test]
fn deep_chain_traverses_iteratively() {
    let graph = gen_chain(100_000, 2).unwrap();
    let order = graph.toposort().unwrap();
    assert_eq!(order.len(), 100_001);
    assert_eq!(order.first(), Some(&0));
    let chart = inside(&graph).unwrap();
    assert!((chart[&100_000] - 1.0).abs() < 1e-9);
}
