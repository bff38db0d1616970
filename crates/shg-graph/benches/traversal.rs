use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shg_core::rng::RngHandle;
use shg_core::LogSpace;
use shg_graph::{gen_layered_forest, inside, sum_product, ForestShape, HypergraphConfig, OutsideStrategy};

fn traversal_bench(c: &mut Criterion) {
    let shape = ForestShape {
        layers: 12,
        width: 64,
        edges_per_node: 4,
        max_arity: 3,
    };
    let mut rng = RngHandle::from_seed(2024);
    let graph = gen_layered_forest(&shape, &mut rng)
        .expect("forest")
        .apply(|e| Some(LogSpace::lift(*e.weight())));

    c.bench_function("inside_layered_forest", |b| {
        b.iter(|| black_box(inside(&graph).expect("inside")));
    });

    for strategy in [OutsideStrategy::Naive, OutsideStrategy::PrefixSuffix] {
        let config = HypergraphConfig {
            outside: strategy,
            ..graph.config().clone()
        };
        let mut variant = shg_graph::Hypergraph::new(config);
        if let Some(root) = graph.root() {
            variant.set_root(*root);
        }
        for edge in graph.edges() {
            variant
                .edge(*edge.weight(), *edge.head(), edge.tail().to_vec())
                .expect("edge");
        }
        c.bench_function(&format!("sum_product_{strategy:?}"), |b| {
            b.iter(|| black_box(sum_product(&variant).expect("sum product")));
        });
    }
}

criterion_group!(benches, traversal_bench);
criterion_main!(benches);
