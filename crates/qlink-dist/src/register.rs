//! Data register split into node ranges.

use std::ops::Range;

use tracing::trace;

use qlink_hal::AmplitudeEngine;
use qlink_ir::{Basis, Bitstring, QubitId};

use crate::error::{DistError, DistResult};
use crate::partition::PartitionPlan;

/// The data qubits of one run plus the slice each node owns.
///
/// Qubits are stored once, in register order; nodes are non-overlapping
/// index ranges over that storage whose union is the whole register.
#[derive(Debug)]
pub struct Register {
    qubits: Vec<QubitId>,
    nodes: Vec<Range<usize>>,
}

impl Register {
    /// Allocate a fresh register laid out according to `plan`.
    pub fn allocate(engine: &mut dyn AmplitudeEngine, plan: &PartitionPlan) -> DistResult<Self> {
        let qubits = engine.allocate(plan.total_qubits())?;
        trace!(nodes = plan.node_count(), ?qubits, "allocated data register");
        Self::from_parts(qubits, plan)
    }

    /// Group already allocated qubits according to `plan`.
    pub fn from_parts(qubits: Vec<QubitId>, plan: &PartitionPlan) -> DistResult<Self> {
        if qubits.len() != plan.total_qubits() {
            return Err(DistError::LengthMismatch {
                expected: plan.total_qubits(),
                got: qubits.len(),
            });
        }
        Ok(Self {
            qubits,
            nodes: plan.ranges(),
        })
    }

    /// All data qubits in register order.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Number of data qubits.
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// True if the register holds no qubits.
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The qubits resident on node `index`.
    pub fn node(&self, index: usize) -> &[QubitId] {
        &self.qubits[self.nodes[index].clone()]
    }

    /// Iterate over node slices in order.
    pub fn nodes(&self) -> impl Iterator<Item = &[QubitId]> + '_ {
        self.nodes.iter().map(|r| &self.qubits[r.clone()])
    }

    /// Measure every data qubit once, in register order.
    pub fn measure_all(&self, engine: &mut dyn AmplitudeEngine) -> DistResult<Bitstring> {
        let bits = self
            .qubits
            .iter()
            .map(|q| engine.measure(*q, Basis::Standard))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Bitstring::from_bits(bits)?)
    }

    /// Reset and free every data qubit.
    pub fn release(self, engine: &mut dyn AmplitudeEngine) -> DistResult<()> {
        engine.release(&self.qubits)?;
        Ok(())
    }
}
