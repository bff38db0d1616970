//! Ancestral sampling of derivations in proportion to their weight.
//!
//! A draw walks down from the root. At every node it picks an incoming edge
//! with probability `weight ⊗ ∏ B[tail] / B[node]`, then descends into the
//! tails left to right. The walk keeps its own stack of frames, so the depth
//! of a derivation is bounded by memory rather than by the thread stack.

use std::fmt::Debug;

use shg_core::errors::{graph_error, HyperError};
use shg_core::rng::RngHandle;
use shg_core::{DivisionSemiring, EdgeId, ToReal};
use shg_graph::{inside, Chart, Derivation, Hypergraph};
use tracing::{debug, trace};

use crate::config::SamplerConfig;
use crate::determinism::draw_seed;

#[derive(Debug, Clone, Copy)]
enum FrameState {
    Fresh,
    Expanding { edge: EdgeId, next_tail: usize },
    Leaf,
}

struct Frame<N> {
    node: N,
    state: FrameState,
    children: Vec<Derivation<N>>,
}

impl<N> Frame<N> {
    fn new(node: N) -> Self {
        Self {
            node,
            state: FrameState::Fresh,
            children: Vec::new(),
        }
    }

    fn finish(self) -> Derivation<N> {
        match self.state {
            FrameState::Expanding { edge, .. } => Derivation::new(self.node, edge, self.children),
            FrameState::Fresh | FrameState::Leaf => Derivation::leaf(self.node),
        }
    }
}

/// Draws one derivation of the root of `graph` given its inside chart.
///
/// Nodes without incoming edges become leaves. A node whose incoming edges
/// all carry zero mass has no derivation to draw and fails with a `zero-mass`
/// error.
pub fn sample<N, W>(
    graph: &Hypergraph<N, W>,
    inside: &Chart<N, W>,
    rng: &mut RngHandle,
) -> Result<Derivation<N>, HyperError>
where
    N: Clone + Ord + Debug,
    W: DivisionSemiring + ToReal,
{
    let root = graph.require_root()?.clone();
    let mut stack = vec![Frame::new(root)];

    while let Some(top) = stack.last_mut() {
        match top.state {
            FrameState::Fresh => {
                top.state = match choose_edge(graph, inside, &top.node, rng)? {
                    Some(edge) => FrameState::Expanding { edge, next_tail: 0 },
                    None => FrameState::Leaf,
                };
                continue;
            }
            FrameState::Expanding { edge, next_tail } => {
                let tail = graph.edge_by_id(edge)?.tail();
                if let Some(child) = tail.get(next_tail) {
                    top.state = FrameState::Expanding {
                        edge,
                        next_tail: next_tail + 1,
                    };
                    stack.push(Frame::new(child.clone()));
                    continue;
                }
            }
            FrameState::Leaf => {}
        }

        let Some(done) = stack.pop() else {
            break;
        };
        let derivation = done.finish();
        match stack.last_mut() {
            Some(parent) => parent.children.push(derivation),
            None => return Ok(derivation),
        }
    }
    Err(graph_error("empty-draw", "sampling stack emptied without a derivation"))
}

/// Picks an incoming edge of `node`, or `None` when it has none.
fn choose_edge<N, W>(
    graph: &Hypergraph<N, W>,
    inside: &Chart<N, W>,
    node: &N,
    rng: &mut RngHandle,
) -> Result<Option<EdgeId>, HyperError>
where
    N: Clone + Ord + Debug,
    W: DivisionSemiring + ToReal,
{
    if graph.in_degree(node) == 0 {
        return Ok(None);
    }
    let normalizer = inside.get(node);
    let masses: Vec<(EdgeId, f64)> = graph
        .incoming(node)
        .map(|edge| {
            let mass = edge
                .weight()
                .mul_all(edge.tail().iter().map(|t| inside.get(t)))
                .div(normalizer)
                .to_real();
            (edge.id(), mass)
        })
        .collect();
    let total: f64 = masses.iter().map(|(_, mass)| mass).sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(graph_error("zero-mass", "node has no derivation with positive weight")
            .with_context("node", format!("{node:?}"))
            .with_context("mass", total));
    }

    let threshold = rng.uniform(total);
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (id, mass) in &masses {
        if *mass > 0.0 {
            last_positive = Some(*id);
        }
        cumulative += mass;
        if cumulative > threshold {
            trace!(node = ?node, edge = %id, threshold, "sampled edge");
            return Ok(Some(*id));
        }
    }
    Ok(last_positive)
}

/// Reproducible stream of draws from one graph.
///
/// The inside chart is computed once. Draw `i` uses its own RNG substream
/// derived from the master seed, so any draw can be replayed in isolation.
pub struct Sampler<'g, N, W> {
    graph: &'g Hypergraph<N, W>,
    inside: Chart<N, W>,
    config: SamplerConfig,
    drawn: u64,
}

impl<'g, N, W> Sampler<'g, N, W>
where
    N: Clone + Ord + Debug,
    W: DivisionSemiring + ToReal,
{
    /// Runs the inside pass and prepares to draw.
    pub fn new(graph: &'g Hypergraph<N, W>, config: SamplerConfig) -> Result<Self, HyperError> {
        let chart = inside(graph)?;
        let total = chart.get(graph.require_root()?);
        debug!(
            total = total.to_real(),
            master_seed = config.seed_policy.master_seed,
            "sampler ready"
        );
        Ok(Self {
            graph,
            inside: chart,
            config,
            drawn: 0,
        })
    }

    /// Inside chart the draws are weighted by.
    pub fn inside(&self) -> &Chart<N, W> {
        &self.inside
    }

    /// Configuration in use.
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Number of draws taken so far.
    pub fn drawn(&self) -> u64 {
        self.drawn
    }

    /// Replays draw number `index` without advancing the sampler.
    pub fn draw_at(&self, index: u64) -> Result<Derivation<N>, HyperError> {
        let mut rng = RngHandle::from_seed(draw_seed(self.config.seed_policy.master_seed, index));
        sample(self.graph, &self.inside, &mut rng)
    }

    /// Takes the next draw.
    pub fn draw(&mut self) -> Result<Derivation<N>, HyperError> {
        let derivation = self.draw_at(self.drawn)?;
        self.drawn += 1;
        Ok(derivation)
    }

    /// Takes the next `count` draws.
    pub fn draws(&mut self, count: usize) -> Result<Vec<Derivation<N>>, HyperError> {
        let batch = (0..count)
            .map(|_| self.draw())
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count, drawn = self.drawn, "draw batch complete");
        Ok(batch)
    }

    /// Takes the number of draws named by the configuration.
    pub fn run(&mut self) -> Result<Vec<Derivation<N>>, HyperError> {
        self.draws(self.config.draws)
    }
}
