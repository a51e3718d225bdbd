//! Error types for the HAL crate.

use qlink_ir::QubitId;
use thiserror::Error;

/// Errors that can occur in engine operations.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum HalError {
    /// Handle does not refer to a live qubit.
    #[error("Qubit {0} is not allocated")]
    UnknownQubit(QubitId),

    /// The same qubit appears twice in one operation.
    #[error("Duplicate qubit {0} in operation")]
    DuplicateQubit(QubitId),

    /// Allocation would exceed the engine's qubit ceiling.
    #[error("Cannot allocate {requested} qubits: {live} live, engine limit is {max}")]
    QubitLimit {
        /// Number of qubits requested.
        requested: usize,
        /// Number of qubits currently allocated.
        live: usize,
        /// Engine ceiling.
        max: usize,
    },

    /// A qubit was freed while not in `|0⟩`.
    #[error("Qubit {0} freed without being reset to |0⟩")]
    NotReleased(QubitId),

    /// Snapshot could not be built or compared.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Result type for engine operations.
pub type HalResult<T> = Result<T, HalError>;
