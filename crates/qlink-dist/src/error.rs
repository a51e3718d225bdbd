//! Error types for the distributed protocols.

use qlink_hal::HalError;
use qlink_ir::IrError;
use thiserror::Error;

/// Errors produced while planning or running a distributed search.
///
/// Every variant is fatal for the run: a failure in the middle of a protocol
/// round leaves the simulated register in an undefined superposition.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DistError {
    /// The register does not fit even at full node utilisation.
    #[error(
        "Cannot fit {total_qubits} qubits on {max_nodes} nodes of capacity {capacity}"
    )]
    CapacityExceeded {
        /// Qubits to place.
        total_qubits: usize,
        /// Qubits per node.
        capacity: usize,
        /// Node budget.
        max_nodes: usize,
    },

    /// The router would need more communication lines than a node can host.
    #[error("Router needs {node_count} communication lines but a node hosts at most {capacity}")]
    RouterTooLarge {
        /// Nodes in the plan.
        node_count: usize,
        /// Qubits per node.
        capacity: usize,
    },

    /// A node grouping and a bitstring (or paired operand lists) disagree in length.
    #[error("Length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Length actually supplied.
        got: usize,
    },

    /// The run needs more concurrently simulated qubits than allowed.
    #[error("Run needs {required} simulated qubits but the ceiling is {ceiling}")]
    TooManyQubits {
        /// Data qubits plus both halves of every concurrent ebit.
        required: usize,
        /// Configured or engine ceiling.
        ceiling: usize,
    },

    /// A remote-gate strategy cannot realise the given grouping.
    #[error("Strategy '{strategy}' cannot run on this grouping: {reason}")]
    UnsupportedGrouping {
        /// Strategy name.
        strategy: &'static str,
        /// Why the grouping was rejected.
        reason: String,
    },

    /// Configuration value out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Amplitude engine failure.
    #[error("Engine error: {0}")]
    Hal(#[from] HalError),

    /// Malformed core value.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for distributed operations.
pub type DistResult<T> = Result<T, DistError>;
