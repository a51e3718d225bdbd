//! Engine capability introspection.

use serde::{Deserialize, Serialize};

use qlink_ir::Gate;

/// What an amplitude engine can do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the engine.
    pub name: String,
    /// Maximum number of simultaneously live qubits.
    pub max_qubits: usize,
    /// Supported base gates; each may take any number of controls.
    pub gates: Vec<Gate>,
    /// Whether measurement randomness comes from a fixed seed.
    pub seeded: bool,
}

impl Capabilities {
    /// Capabilities of a state-vector simulator with the given ceiling.
    pub fn simulator(max_qubits: usize) -> Self {
        Self {
            name: "statevector".into(),
            max_qubits,
            gates: vec![Gate::X, Gate::Z, Gate::H],
            seeded: false,
        }
    }

    /// Mark the engine as seeded.
    #[must_use]
    pub fn with_seeded(mut self, seeded: bool) -> Self {
        self.seeded = seeded;
        self
    }

    /// Whether `gate` is supported.
    pub fn supports(&self, gate: Gate) -> bool {
        self.gates.contains(&gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(12).with_seeded(true);
        assert_eq!(caps.max_qubits, 12);
        assert!(caps.seeded);
        assert!(caps.supports(Gate::H));
    }
}
