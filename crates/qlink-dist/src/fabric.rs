//! Ebit fabric: on-demand entangled pairs between a node and the router.

use serde::{Deserialize, Serialize};
use tracing::trace;

use qlink_hal::AmplitudeEngine;
use qlink_ir::{Gate, QubitId};

use crate::error::DistResult;

/// One shared entangled pair in the state `(|00⟩ + |11⟩)/√2`.
///
/// Not `Clone`: each pair is owned by the protocol round that prepared it and
/// is consumed by [`EbitFabric::release`].
#[derive(Debug, PartialEq, Eq)]
pub struct Ebit {
    /// Half resident on the participating node.
    pub local: QubitId,
    /// Half resident on the router.
    pub router: QubitId,
}

/// Running totals kept by a fabric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricStats {
    /// Pairs prepared so far.
    pub prepared: u64,
    /// Pairs reset and released so far.
    pub released: u64,
    /// Largest number of live engine qubits observed right after a preparation.
    pub peak_live_qubits: usize,
}

/// Prepares and releases ebits against an amplitude engine.
#[derive(Debug, Default)]
pub struct EbitFabric {
    stats: FabricStats,
}

impl EbitFabric {
    /// Create a fabric with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare `count` fresh pairs: H on the local half, then CNOT into the router half.
    pub fn prepare(
        &mut self,
        engine: &mut dyn AmplitudeEngine,
        count: usize,
    ) -> DistResult<Vec<Ebit>> {
        let halves = engine.allocate(2 * count)?;
        let mut ebits = Vec::with_capacity(count);
        for pair in halves.chunks_exact(2) {
            let (local, router) = (pair[0], pair[1]);
            engine.apply(Gate::H, &[], local)?;
            engine.apply(Gate::X, &[local], router)?;
            ebits.push(Ebit { local, router });
        }
        self.stats.prepared += count as u64;
        self.stats.peak_live_qubits = self.stats.peak_live_qubits.max(engine.num_live_qubits());
        trace!(count, live = engine.num_live_qubits(), "prepared ebits");
        Ok(ebits)
    }

    /// Reset both halves of every pair and return them to the engine.
    pub fn release(&mut self, engine: &mut dyn AmplitudeEngine, ebits: Vec<Ebit>) -> DistResult<()> {
        let halves: Vec<QubitId> = ebits.iter().flat_map(|e| [e.local, e.router]).collect();
        engine.release(&halves)?;
        self.stats.released += ebits.len() as u64;
        trace!(count = ebits.len(), "released ebits");
        Ok(())
    }

    /// Counters so far.
    pub fn stats(&self) -> FabricStats {
        self.stats
    }

    /// Pairs prepared but not yet released.
    pub fn outstanding(&self) -> u64 {
        self.stats.prepared - self.stats.released
    }
}
