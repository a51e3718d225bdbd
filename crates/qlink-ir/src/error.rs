//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while building core values.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum IrError {
    /// A bitstring was empty.
    #[error("Bitstring must contain at least one bit")]
    EmptyBitstring,

    /// A bitstring contained something other than `0` or `1`.
    #[error("Invalid character {ch:?} at position {position} in bitstring")]
    InvalidBit {
        /// The offending character.
        ch: char,
        /// Zero-based position in the input.
        position: usize,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
