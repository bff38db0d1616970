use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shg_core::rng::RngHandle;
use shg_core::LogSpace;
use shg_graph::{gen_chain, gen_layered_forest, ForestShape};
use shg_sample::{Sampler, SamplerConfig};

fn draw_bench(c: &mut Criterion) {
    let shape = ForestShape {
        layers: 10,
        width: 32,
        edges_per_node: 4,
        max_arity: 3,
    };
    let forest = gen_layered_forest(&shape, &mut RngHandle::from_seed(11))
        .expect("forest")
        .apply(|e| Some(LogSpace::lift(*e.weight())));
    let mut sampler = Sampler::new(&forest, SamplerConfig::with_seed(1)).expect("sampler");
    c.bench_function("draw_layered_forest", |b| {
        b.iter(|| black_box(sampler.draw().expect("draw")));
    });

    let chain = gen_chain(10_000, 2).expect("chain");
    let mut sampler = Sampler::new(&chain, SamplerConfig::with_seed(2)).expect("sampler");
    c.bench_function("draw_chain_10k", |b| {
        b.iter(|| black_box(sampler.draw().expect("draw")));
    });
}

criterion_group!(benches, draw_bench);
criterion_main!(benches);
