//! Simulator engine implementation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use qlink_hal::{AmplitudeEngine, Capabilities, HalError, HalResult, StateSnapshot};
use qlink_ir::{Basis, Gate, QubitId};

use crate::statevector::Statevector;

/// Default ceiling on simultaneously live qubits.
const DEFAULT_MAX_QUBITS: usize = 20;

/// Local statevector amplitude engine.
///
/// Handles are slot indices. A freed slot is reissued by the next
/// allocation, so callers must not keep a handle after freeing it.
pub struct SimulatorEngine {
    /// Engine capabilities.
    capabilities: Capabilities,
    /// Simulated state.
    state: Statevector,
}

impl SimulatorEngine {
    /// Create a new engine with default settings and entropy-seeded measurement.
    pub fn new() -> Self {
        Self {
            capabilities: Capabilities::simulator(DEFAULT_MAX_QUBITS),
            state: Statevector::new(StdRng::from_entropy()),
        }
    }

    /// Create an engine with a custom qubit ceiling.
    pub fn with_max_qubits(max_qubits: usize) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits),
            ..Self::new()
        }
    }

    /// Make every measurement outcome reproducible.
    ///
    /// Must be called before any qubit is allocated.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        debug!(seed, "seeding statevector engine");
        self.state = Statevector::seeded(seed);
        self.capabilities = self.capabilities.with_seeded(true);
        self
    }

    /// Number of slots the amplitude vector currently spans.
    pub fn num_slots(&self) -> usize {
        self.state.num_slots()
    }

    fn slot(&self, qubit: QubitId) -> HalResult<usize> {
        let slot = qubit.index();
        if self.state.is_live(slot) {
            Ok(slot)
        } else {
            Err(HalError::UnknownQubit(qubit))
        }
    }

    fn distinct_slots(&self, qubits: &[QubitId]) -> HalResult<Vec<usize>> {
        let mut slots = Vec::with_capacity(qubits.len());
        for &qubit in qubits {
            let slot = self.slot(qubit)?;
            if slots.contains(&slot) {
                return Err(HalError::DuplicateQubit(qubit));
            }
            slots.push(slot);
        }
        Ok(slots)
    }
}

impl Default for SimulatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AmplitudeEngine for SimulatorEngine {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn num_live_qubits(&self) -> usize {
        self.state.num_live()
    }

    fn allocate(&mut self, n: usize) -> HalResult<Vec<QubitId>> {
        let live = self.num_live_qubits();
        if live + n > self.capabilities.max_qubits {
            return Err(HalError::QubitLimit {
                requested: n,
                live,
                max: self.capabilities.max_qubits,
            });
        }
        let qubits: Vec<QubitId> = (0..n)
            .map(|_| QubitId(self.state.claim_slot() as u32))
            .collect();
        trace!(?qubits, live = self.num_live_qubits(), "allocated");
        Ok(qubits)
    }

    fn free(&mut self, qubits: &[QubitId]) -> HalResult<()> {
        let slots = self.distinct_slots(qubits)?;
        if let Some(pos) = slots.iter().position(|s| !self.state.is_zero(*s)) {
            return Err(HalError::NotReleased(qubits[pos]));
        }
        for slot in slots {
            self.state.release_slot(slot);
        }
        trace!(?qubits, live = self.num_live_qubits(), "freed");
        Ok(())
    }

    fn apply(&mut self, gate: Gate, controls: &[QubitId], target: QubitId) -> HalResult<()> {
        let mut operands = controls.to_vec();
        operands.push(target);
        let mut slots = self.distinct_slots(&operands)?;
        let target_slot = slots.pop().unwrap_or_default();
        self.state.apply_gate(gate, &slots, target_slot);
        Ok(())
    }

    fn measure(&mut self, qubit: QubitId, basis: Basis) -> HalResult<bool> {
        let slot = self.slot(qubit)?;
        let outcome = match basis {
            Basis::Standard => self.state.measure(slot),
            Basis::X => {
                self.state.apply_gate(Gate::H, &[], slot);
                let bit = self.state.measure(slot);
                self.state.apply_gate(Gate::H, &[], slot);
                bit
            }
        };
        trace!(%qubit, %basis, outcome, "measured");
        Ok(outcome)
    }

    fn dump(&self, qubits: &[QubitId]) -> HalResult<StateSnapshot> {
        let slots = self.distinct_slots(qubits)?;
        StateSnapshot::new(qubits.to_vec(), self.state.amplitudes_over(&slots))
    }
}
