use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use shg_core::errors::{graph_error, missing_root, ErrorInfo, HyperError};
use shg_core::EdgeId;
use tracing::debug;

use crate::config::HypergraphConfig;

/// A weighted hyperedge `head ← tail`.
///
/// Edges are owned by their [`Hypergraph`] and immutable after insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<N, W> {
    id: EdgeId,
    weight: W,
    head: N,
    tail: Vec<N>,
}

impl<N, W> Edge<N, W> {
    /// Identifier of the edge within its graph.
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Semiring weight of the edge.
    pub fn weight(&self) -> &W {
        &self.weight
    }

    /// Node produced by the edge.
    pub fn head(&self) -> &N {
        &self.head
    }

    /// Ordered tail nodes combined by the edge.
    pub fn tail(&self) -> &[N] {
        &self.tail
    }

    /// Number of tail nodes.
    pub fn arity(&self) -> usize {
        self.tail.len()
    }
}

/// Directed acyclic hypergraph whose edges carry weights in a semiring `W`.
///
/// Nodes are opaque application values; the engine only compares them. Each
/// head maps to its incoming edges in insertion order, which is also the order
/// in which traversals visit them.
#[derive(Debug, Clone)]
pub struct Hypergraph<N, W> {
    config: HypergraphConfig,
    root: Option<N>,
    edges: Vec<Edge<N, W>>,
    incoming: BTreeMap<N, Vec<EdgeId>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Visiting,
    Visited,
}

/// DFS cursor: which incoming edge and tail position of `node` comes next.
struct Cursor<N> {
    node: N,
    edge: usize,
    tail: usize,
}

impl<N> Cursor<N> {
    fn new(node: N) -> Self {
        Self {
            node,
            edge: 0,
            tail: 0,
        }
    }
}

impl<N, W> Hypergraph<N, W>
where
    N: Clone + Ord + Debug,
{
    /// Creates an empty hypergraph with the provided configuration.
    pub fn new(config: HypergraphConfig) -> Self {
        Self {
            config,
            root: None,
            edges: Vec::new(),
            incoming: BTreeMap::new(),
        }
    }

    /// Creates an empty hypergraph with default configuration and the given root.
    pub fn with_root(root: N) -> Self {
        let mut graph = Self::default();
        graph.set_root(root);
        graph
    }

    /// Returns the configuration used by this graph.
    pub fn config(&self) -> &HypergraphConfig {
        &self.config
    }

    /// Returns the designated root, if any.
    pub fn root(&self) -> Option<&N> {
        self.root.as_ref()
    }

    /// Designates the node whose derivations the traversals evaluate.
    pub fn set_root(&mut self, root: N) {
        self.root = Some(root);
    }

    /// Returns the root or a [`HyperError::MissingRoot`] error.
    pub fn require_root(&self) -> Result<&N, HyperError> {
        self.root.as_ref().ok_or_else(missing_root)
    }

    /// Inserts the hyperedge `head ← tail` with the given weight.
    pub fn edge<I>(&mut self, weight: W, head: N, tail: I) -> Result<EdgeId, HyperError>
    where
        I: IntoIterator<Item = N>,
    {
        let tail: Vec<N> = tail.into_iter().collect();
        if !self.config.accepts_arity(tail.len()) {
            return Err(graph_error("arity-cap", "hyperedge tail exceeds the configured arity")
                .with_context("head", format!("{head:?}"))
                .with_context("arity", tail.len())
                .with_context("cap", self.config.max_arity.unwrap_or_default()));
        }
        Ok(self.push_edge(weight, head, tail))
    }

    fn push_edge(&mut self, weight: W, head: N, tail: Vec<N>) -> EdgeId {
        let id = EdgeId::from_index(self.edges.len());
        self.incoming.entry(head.clone()).or_default().push(id);
        self.edges.push(Edge {
            id,
            weight,
            head,
            tail,
        });
        id
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge<N, W>] {
        &self.edges
    }

    /// Looks up an edge by identifier.
    pub fn edge_by_id(&self, id: EdgeId) -> Result<&Edge<N, W>, HyperError> {
        self.edges.get(id.index()).ok_or_else(|| {
            graph_error("unknown-edge", "edge does not exist").with_context("edge", id)
        })
    }

    /// Incoming edges of `node`, in insertion order.
    pub fn incoming<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a Edge<N, W>> + 'a {
        self.incoming_ids(node)
            .iter()
            .map(move |id| &self.edges[id.index()])
    }

    fn incoming_ids(&self, node: &N) -> &[EdgeId] {
        self.incoming.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of edges whose head is `node`.
    pub fn in_degree(&self, node: &N) -> usize {
        self.incoming_ids(node).len()
    }

    /// Every node mentioned as a head or a tail.
    pub fn nodes(&self) -> BTreeSet<N> {
        let mut nodes: BTreeSet<N> = self.incoming.keys().cloned().collect();
        for edge in &self.edges {
            nodes.extend(edge.tail.iter().cloned());
        }
        nodes
    }

    /// Tail nodes that no edge produces.
    pub fn terminals(&self) -> BTreeSet<N> {
        self.edges
            .iter()
            .flat_map(|edge| edge.tail.iter())
            .filter(|node| !self.incoming.contains_key(*node))
            .cloned()
            .collect()
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Topological order of the nodes that derive the root.
    ///
    /// Depth-first post-order from the root over an explicit stack: every
    /// node appears after all tails of all its incoming edges. Only nodes with
    /// incoming edges are listed; terminals are inputs, not evaluated.
    pub fn toposort(&self) -> Result<Vec<N>, HyperError> {
        let root = self.require_root()?.clone();
        let mut states: BTreeMap<N, VisitState> = BTreeMap::new();
        let mut order = Vec::new();
        states.insert(root.clone(), VisitState::Visiting);
        let mut stack = vec![Cursor::new(root)];

        while let Some(cursor) = stack.last_mut() {
            match self.advance(cursor) {
                Some(child) => match states.get(&child) {
                    None => {
                        states.insert(child.clone(), VisitState::Visiting);
                        stack.push(Cursor::new(child));
                    }
                    Some(VisitState::Visiting) if self.config.detect_cycles => {
                        return Err(HyperError::Cyclic(
                            ErrorInfo::new("cycle", "cycle reachable from the root")
                                .with_context("node", format!("{child:?}")),
                        ));
                    }
                    Some(_) => {}
                },
                None => {
                    if let Some(done) = stack.pop() {
                        states.insert(done.node.clone(), VisitState::Visited);
                        if self.incoming.contains_key(&done.node) {
                            order.push(done.node);
                        }
                    }
                }
            }
        }
        Ok(order)
    }

    /// Moves the cursor to its next tail node, or `None` once exhausted.
    fn advance(&self, cursor: &mut Cursor<N>) -> Option<N> {
        let ids = self.incoming_ids(&cursor.node);
        while let Some(id) = ids.get(cursor.edge) {
            let tail = &self.edges[id.index()].tail;
            if let Some(child) = tail.get(cursor.tail) {
                cursor.tail += 1;
                return Some(child.clone());
            }
            cursor.edge += 1;
            cursor.tail = 0;
        }
        None
    }

    /// Re-weights every edge through `f`, dropping edges mapped to `None`.
    ///
    /// Root and configuration carry over; surviving edges are renumbered.
    pub fn apply<V, F>(&self, mut f: F) -> Hypergraph<N, V>
    where
        F: FnMut(&Edge<N, W>) -> Option<V>,
    {
        let mut graph = Hypergraph::new(self.config.clone());
        graph.root = self.root.clone();
        for edge in &self.edges {
            if let Some(weight) = f(edge) {
                graph.push_edge(weight, edge.head.clone(), edge.tail.clone());
            }
        }
        graph
    }
}

impl<N, W> Hypergraph<N, W>
where
    N: Clone + Ord + Debug,
    W: Clone,
{
    /// Keeps only the edges whose head and tails all lie in `nodes`.
    pub fn prune_nodes(&self, nodes: &BTreeSet<N>) -> Self {
        self.apply(|edge| {
            let inside = nodes.contains(&edge.head) && edge.tail.iter().all(|t| nodes.contains(t));
            inside.then(|| edge.weight.clone())
        })
    }

    /// Restricts the graph to the nodes visited by [`toposort`](Self::toposort).
    pub fn prune_to_reachable(&self) -> Result<Self, HyperError> {
        let reachable: BTreeSet<N> = self.toposort()?.into_iter().collect();
        let pruned = self.prune_nodes(&reachable);
        debug!(
            before = self.len(),
            after = pruned.len(),
            nodes = reachable.len(),
            "pruned to reachable subgraph"
        );
        Ok(pruned)
    }

    /// Repeats [`prune_to_reachable`](Self::prune_to_reachable) until no edge is removed.
    pub fn prune_fixpoint(&self) -> Result<Self, HyperError> {
        let mut current = self.prune_to_reachable()?;
        let mut rounds = 1usize;
        loop {
            let next = current.prune_to_reachable()?;
            if next.len() == current.len() {
                debug!(rounds, edges = next.len(), "pruning reached a fixed point");
                return Ok(next);
            }
            current = next;
            rounds += 1;
        }
    }
}

impl<N, W> Default for Hypergraph<N, W>
where
    N: Clone + Ord + Debug,
{
    fn default() -> Self {
        Self::new(HypergraphConfig::default())
    }
}
