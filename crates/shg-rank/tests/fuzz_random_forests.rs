use proptest::prelude::*;
use shg_core::rng::RngHandle;
use shg_graph::{enumerate_scored, gen_layered_forest, ForestShape};
use shg_rank::kbest;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn kbest_prefix_matches_enumeration(
        layers in 1usize..=3,
        width in 1usize..=3,
        edges_per_node in 1usize..=2,
        k in 1usize..=20,
        seed in any::<u64>()
    ) {
        let shape = ForestShape { layers, width, edges_per_node, max_arity: 2 };
        let graph = gen_layered_forest(&shape, &mut RngHandle::from_seed(seed)).unwrap();
        let mut expected: Vec<f64> = enumerate_scored(&graph)
            .unwrap()
            .into_iter()
            .map(|(_, s)| s)
            .collect();
        expected.sort_by(|a, b| b.total_cmp(a));
        expected.truncate(k);

        let found: Vec<f64> = kbest(&graph, k).unwrap().into_iter().map(|(s, _)| s).collect();
        prop_assert_eq!(found.len(), expected.len());
        for (a, b) in found.iter().zip(&expected) {
            prop_assert!((a - b).abs() <= 1e-12, "{} vs {}", a, b);
        }
    }
}
