use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shg_core::errors::{ErrorInfo, HyperError};
use shg_core::Semiring;

use crate::config::{HypergraphConfig, SchemaVersion};
use crate::hypergraph::Hypergraph;

/// Snapshot schema understood by this crate; majors must match on restore.
pub const SNAPSHOT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes<N, W>(graph: &Hypergraph<N, W>) -> Result<Vec<u8>, HyperError>
where
    N: Clone + Ord + Debug + Serialize,
    W: Semiring + Serialize,
{
    bincode::serialize(&Snapshot::from_graph(graph))
        .map_err(|err| HyperError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes<N, W>(bytes: &[u8]) -> Result<Hypergraph<N, W>, HyperError>
where
    N: Clone + Ord + Debug + DeserializeOwned,
    W: Semiring + DeserializeOwned,
{
    let header: SnapshotHeader = bincode::deserialize(bytes)
        .map_err(|err| HyperError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    header.check::<W>()?;
    let snapshot: Snapshot<N, W> = bincode::deserialize(bytes)
        .map_err(|err| HyperError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    snapshot.into_graph()
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json<N, W>(graph: &Hypergraph<N, W>) -> Result<String, HyperError>
where
    N: Clone + Ord + Debug + Serialize,
    W: Semiring + Serialize,
{
    serde_json::to_string_pretty(&Snapshot::from_graph(graph))
        .map_err(|err| HyperError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from a JSON string.
///
/// Fails with [`HyperError::TypeMismatch`] when the snapshot was written for
/// a different semiring than `W`.
pub fn graph_from_json<N, W>(json: &str) -> Result<Hypergraph<N, W>, HyperError>
where
    N: Clone + Ord + Debug + DeserializeOwned,
    W: Semiring + DeserializeOwned,
{
    let header: SnapshotHeader = serde_json::from_str(json)
        .map_err(|err| HyperError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    header.check::<W>()?;
    let snapshot: Snapshot<N, W> = serde_json::from_str(json)
        .map_err(|err| HyperError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    snapshot.into_graph()
}

/// Leading fields of [`Snapshot`], read before the weights are decoded.
#[derive(Debug, Deserialize)]
struct SnapshotHeader {
    semiring: String,
    schema_version: SchemaVersion,
}

impl SnapshotHeader {
    fn check<W: Semiring>(&self) -> Result<(), HyperError> {
        if self.semiring != W::NAME {
            return Err(HyperError::TypeMismatch(
                ErrorInfo::new("semiring-mismatch", "snapshot holds weights of another semiring")
                    .with_context("expected", W::NAME)
                    .with_context("found", &self.semiring),
            ));
        }
        if self.schema_version.major != SNAPSHOT_SCHEMA.major {
            return Err(HyperError::Serde(
                ErrorInfo::new("schema-version", "unsupported snapshot schema")
                    .with_context("expected", SNAPSHOT_SCHEMA.major)
                    .with_context("found", self.schema_version.major),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot<N, W> {
    semiring: String,
    schema_version: SchemaVersion,
    config: HypergraphConfig,
    root: Option<N>,
    edges: Vec<SnapshotEdge<N, W>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEdge<N, W> {
    weight: W,
    head: N,
    tail: Vec<N>,
}

impl<N, W> Snapshot<N, W>
where
    N: Clone + Ord + Debug,
    W: Semiring,
{
    fn from_graph(graph: &Hypergraph<N, W>) -> Self {
        let edges = graph
            .edges()
            .iter()
            .map(|edge| SnapshotEdge {
                weight: edge.weight().clone(),
                head: edge.head().clone(),
                tail: edge.tail().to_vec(),
            })
            .collect();
        Self {
            semiring: W::NAME.to_string(),
            schema_version: graph.config().schema_version,
            config: graph.config().clone(),
            root: graph.root().cloned(),
            edges,
        }
    }

    fn into_graph(self) -> Result<Hypergraph<N, W>, HyperError> {
        let mut graph = Hypergraph::new(self.config);
        if let Some(root) = self.root {
            graph.set_root(root);
        }
        for edge in self.edges {
            graph.edge(edge.weight, edge.head, edge.tail)?;
        }
        Ok(graph)
    }
}
