use serde::{Deserialize, Serialize};
use shg_core::errors::{ErrorInfo, HyperError};

/// YAML-configurable parameters governing a batch of draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Number of derivations drawn by [`Sampler::run`](crate::Sampler::run).
    #[serde(default = "default_draws")]
    pub draws: usize,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

fn default_draws() -> usize {
    1_000
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            draws: default_draws(),
            seed_policy: SeedPolicy::default(),
        }
    }
}

impl SamplerConfig {
    /// Parses a configuration from YAML, filling omitted fields with defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, HyperError> {
        serde_yaml::from_str(yaml)
            .map_err(|err| HyperError::Config(ErrorInfo::new("parse-yaml", err.to_string())))
    }

    /// Shorthand for a configuration with the given master seed.
    pub fn with_seed(master_seed: u64) -> Self {
        Self {
            seed_policy: SeedPolicy {
                master_seed,
                ..SeedPolicy::default()
            },
            ..Self::default()
        }
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed from which every draw's substream is derived.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label recorded alongside results.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}
