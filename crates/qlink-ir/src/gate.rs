//! Gate kinds and measurement bases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Single-qubit gates understood by every amplitude engine.
///
/// Each may be applied with zero or more controls, so `Gate::X` with one
/// control is a CNOT and `Gate::Z` with `n` controls is a multi-controlled Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gate {
    /// Bit flip.
    X,
    /// Phase flip.
    Z,
    /// Hadamard basis change.
    H,
}

impl Gate {
    /// OpenQASM-style lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Gate::X => "x",
            Gate::Z => "z",
            Gate::H => "h",
        }
    }

    /// Name including the control prefix, e.g. `ccz` for two controls.
    pub fn controlled_name(self, num_controls: usize) -> String {
        match num_controls {
            0..=2 => format!("{}{}", "c".repeat(num_controls), self.name()),
            n => format!("mc{}[{n}]", self.name()),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Basis in which a qubit is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Basis {
    /// Computational (Z) basis.
    #[default]
    Standard,
    /// Hadamard (X) basis.
    X,
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Basis::Standard => f.write_str("standard"),
            Basis::X => f.write_str("x"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controlled_names() {
        assert_eq!(Gate::X.controlled_name(0), "x");
        assert_eq!(Gate::X.controlled_name(1), "cx");
        assert_eq!(Gate::Z.controlled_name(2), "ccz");
        assert_eq!(Gate::Z.controlled_name(5), "mcz[5]");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Gate::H).unwrap(), "\"h\"");
        assert_eq!(serde_json::to_string(&Basis::X).unwrap(), "\"x\"");
    }
}
