//! Amplitude engine trait.
//!
//! The [`AmplitudeEngine`] trait is the only way the distributed protocols
//! reach simulated state:
//!
//! ```text
//!   allocate() ──→ apply() / measure() ──→ reset() ──→ free()
//! ```
//!
//! ## Method table
//!
//! | Method | Required | Returns |
//! |--------|----------|---------|
//! | `name()` | yes | `&str` |
//! | `capabilities()` | yes | `&Capabilities` |
//! | `num_live_qubits()` | yes | `usize` |
//! | `allocate()` | yes | `HalResult<Vec<QubitId>>` |
//! | `free()` | yes | `HalResult<()>` |
//! | `apply()` | yes | `HalResult<()>` |
//! | `measure()` | yes | `HalResult<bool>` |
//! | `dump()` | yes | `HalResult<StateSnapshot>` |
//! | `reset()` | provided | `HalResult<()>` |
//! | `release()` | provided | `HalResult<()>` |
//! | `apply_each()` | provided | `HalResult<()>` |

use qlink_ir::{Basis, Gate, QubitId};

use crate::capability::Capabilities;
use crate::error::HalResult;
use crate::snapshot::StateSnapshot;

/// Trait for engines that own simulated qubit state.
///
/// # Contract
///
/// - `allocate(n)` MUST return `n` distinct handles, each in `|0⟩`.
/// - `apply` is a deterministic unitary; every operand MUST be live and
///   distinct.
/// - `measure` collapses the state. Engines used in tests SHOULD be seedable
///   so that outcomes are reproducible.
/// - `free` MUST reject a qubit that is not in `|0⟩`; callers reset first.
pub trait AmplitudeEngine {
    /// Name of the engine.
    fn name(&self) -> &str;

    /// Engine capabilities.
    fn capabilities(&self) -> &Capabilities;

    /// Number of currently allocated qubits.
    fn num_live_qubits(&self) -> usize;

    /// Allocate `n` fresh qubits in `|0⟩`.
    fn allocate(&mut self, n: usize) -> HalResult<Vec<QubitId>>;

    /// Return qubits to the engine. Each must be in `|0⟩`.
    fn free(&mut self, qubits: &[QubitId]) -> HalResult<()>;

    /// Apply `gate` to `target`, conditioned on every control being `|1⟩`.
    fn apply(&mut self, gate: Gate, controls: &[QubitId], target: QubitId) -> HalResult<()>;

    /// Measure a qubit in the given basis, collapsing the state.
    ///
    /// For [`Basis::X`], `true` means the `|−⟩` outcome and the qubit is left
    /// in that eigenstate.
    fn measure(&mut self, qubit: QubitId, basis: Basis) -> HalResult<bool>;

    /// Debug snapshot of the amplitudes over `qubits`.
    fn dump(&self, qubits: &[QubitId]) -> HalResult<StateSnapshot>;

    /// Measure in the standard basis and flip back to `|0⟩` if needed.
    fn reset(&mut self, qubit: QubitId) -> HalResult<()> {
        if self.measure(qubit, Basis::Standard)? {
            self.apply(Gate::X, &[], qubit)?;
        }
        Ok(())
    }

    /// Reset every qubit and free them.
    fn release(&mut self, qubits: &[QubitId]) -> HalResult<()> {
        for &qubit in qubits {
            self.reset(qubit)?;
        }
        self.free(qubits)
    }

    /// Apply an uncontrolled `gate` to each qubit in turn.
    fn apply_each(&mut self, gate: Gate, qubits: &[QubitId]) -> HalResult<()> {
        for &qubit in qubits {
            self.apply(gate, &[], qubit)?;
        }
        Ok(())
    }
}
