//! Qubit handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a qubit owned by an amplitude engine.
///
/// A handle carries identity only. Engines hand them out on allocation and
/// may reissue the same value after the qubit has been freed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Slot index of this handle inside the engine.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}
