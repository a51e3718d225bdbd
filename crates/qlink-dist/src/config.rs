//! Run configuration.

use serde::{Deserialize, Serialize};

use qlink_ir::Bitstring;

use crate::error::{DistError, DistResult};
use crate::remote::StrategyKind;

fn default_node_capacity() -> usize {
    5
}

fn default_max_nodes() -> usize {
    5
}

fn default_max_sim_qubits() -> usize {
    20
}

fn default_shots() -> u32 {
    1
}

/// Immutable parameters of one distributed search run.
///
/// Only `target` is required when deserialising; every other field has a
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Pattern the oracle marks. Its length is the register size.
    pub target: Bitstring,
    /// Qubits each node can hold.
    #[serde(default = "default_node_capacity")]
    pub node_capacity: usize,
    /// Node budget.
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,
    /// Run exactly one layer regardless of register size.
    #[serde(default)]
    pub single_layer: bool,
    /// Informational tracing level; never affects error handling.
    #[serde(default)]
    pub verbosity: u8,
    /// Ceiling on concurrently simulated qubits (data + ebit halves).
    #[serde(default = "default_max_sim_qubits")]
    pub max_sim_qubits: usize,
    /// Independent repetitions of the whole search.
    #[serde(default = "default_shots")]
    pub shots: u32,
    /// Seed for reproducible measurement outcomes.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Remote multi-controlled-Z strategy.
    #[serde(default)]
    pub strategy: StrategyKind,
}

impl RunConfig {
    /// Configuration with defaults for everything but the target.
    pub fn new(target: Bitstring) -> Self {
        Self {
            target,
            node_capacity: default_node_capacity(),
            max_nodes: default_max_nodes(),
            single_layer: false,
            verbosity: 0,
            max_sim_qubits: default_max_sim_qubits(),
            shots: default_shots(),
            seed: None,
            strategy: StrategyKind::default(),
        }
    }

    /// Parse the target from a `0`/`1` string.
    pub fn from_target_str(target: &str) -> DistResult<Self> {
        Ok(Self::new(target.parse()?))
    }

    /// Set the per-node capacity.
    #[must_use]
    pub fn with_node_capacity(mut self, capacity: usize) -> Self {
        self.node_capacity = capacity;
        self
    }

    /// Set the node budget.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Force a single layer.
    #[must_use]
    pub fn with_single_layer(mut self, single_layer: bool) -> Self {
        self.single_layer = single_layer;
        self
    }

    /// Set the tracing verbosity.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the simulation qubit ceiling.
    #[must_use]
    pub fn with_max_sim_qubits(mut self, max_sim_qubits: usize) -> Self {
        self.max_sim_qubits = max_sim_qubits;
        self
    }

    /// Set the number of shots.
    #[must_use]
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Fix the measurement seed.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Choose the remote-gate strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Reject values no run can use.
    pub fn validate(&self) -> DistResult<()> {
        if self.node_capacity == 0 {
            return Err(DistError::InvalidConfig(
                "node_capacity must be at least 1".into(),
            ));
        }
        if self.max_nodes == 0 {
            return Err(DistError::InvalidConfig("max_nodes must be at least 1".into()));
        }
        if self.shots == 0 {
            return Err(DistError::InvalidConfig("shots must be at least 1".into()));
        }
        Ok(())
    }
}
