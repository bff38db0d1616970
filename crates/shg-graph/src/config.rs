use serde::{Deserialize, Serialize};
use shg_core::errors::{ErrorInfo, HyperError};

/// Configuration options that control the behaviour of [`Hypergraph`](crate::Hypergraph).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypergraphConfig {
    /// Whether traversals reject cycles reachable from the root.
    #[serde(default = "default_detect_cycles")]
    pub detect_cycles: bool,
    /// Maximum tail length permitted for any hyperedge.
    #[serde(default)]
    pub max_arity: Option<usize>,
    /// Evaluation strategy for the outside pass.
    #[serde(default)]
    pub outside: OutsideStrategy,
    /// Schema version stored alongside serialized snapshots.
    #[serde(default)]
    pub schema_version: SchemaVersion,
}

fn default_detect_cycles() -> bool {
    true
}

impl Default for HypergraphConfig {
    fn default() -> Self {
        Self {
            detect_cycles: default_detect_cycles(),
            max_arity: None,
            outside: OutsideStrategy::default(),
            schema_version: SchemaVersion::default(),
        }
    }
}

impl HypergraphConfig {
    /// Parses a configuration from YAML, filling omitted fields with defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, HyperError> {
        serde_yaml::from_str(yaml).map_err(|err| {
            HyperError::Config(ErrorInfo::new("parse-yaml", err.to_string()))
        })
    }

    /// Validates the arity of a tail against the configured cap.
    pub fn accepts_arity(&self, arity: usize) -> bool {
        self.max_arity.map_or(true, |cap| arity <= cap)
    }
}

/// How the outside pass combines the inside values of sibling tail nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutsideStrategy {
    /// Recompute the product of siblings for every tail position, O(n²) per edge.
    Naive,
    /// Share prefix and suffix products across tail positions, O(n) per edge.
    #[default]
    PrefixSuffix,
}

/// Semantic version describing the layout of serialized snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}
