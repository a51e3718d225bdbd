//! One Grover layer (oracle + diffuser) over a partitioned register.

use serde::{Deserialize, Serialize};
use tracing::trace;

use qlink_hal::AmplitudeEngine;
use qlink_ir::{Bitstring, Gate, QubitId};

use crate::error::{DistError, DistResult};
use crate::fabric::EbitFabric;
use crate::register::Register;
use crate::remote::{DistributedMcz, RoundReport};

/// Reports of the two multi-controlled-Z rounds in one layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerReport {
    /// Round run by the oracle.
    pub oracle: RoundReport,
    /// Round run by the diffuser.
    pub diffuser: RoundReport,
}

impl LayerReport {
    /// Ebits consumed by both rounds.
    pub fn ebits(&self) -> usize {
        self.oracle.ebits + self.diffuser.ebits
    }
}

/// Builds oracle and diffuser for a fixed target using one remote-gate strategy.
pub struct GroverLayer<'a> {
    target: &'a Bitstring,
    mcz: &'a dyn DistributedMcz,
}

impl<'a> GroverLayer<'a> {
    /// Create a layer marking `target`.
    pub fn new(target: &'a Bitstring, mcz: &'a dyn DistributedMcz) -> Self {
        Self { target, mcz }
    }

    fn check(&self, register: &Register) -> DistResult<()> {
        if register.len() != self.target.len() {
            return Err(DistError::LengthMismatch {
                expected: self.target.len(),
                got: register.len(),
            });
        }
        Ok(())
    }

    /// Phase-flip the target state: X on every zero bit, MCZ, undo the X gates.
    pub fn oracle(
        &self,
        engine: &mut dyn AmplitudeEngine,
        fabric: &mut EbitFabric,
        register: &Register,
    ) -> DistResult<RoundReport> {
        self.check(register)?;
        let flipped: Vec<QubitId> = self
            .target
            .zero_positions()
            .map(|i| register.qubits()[i])
            .collect();
        engine.apply_each(Gate::X, &flipped)?;
        let report = self.mcz.apply(engine, fabric, register)?;
        engine.apply_each(Gate::X, &flipped)?;
        Ok(report)
    }

    /// Reflect about the start state: H on every qubit, MCZ, H again.
    pub fn diffuser(
        &self,
        engine: &mut dyn AmplitudeEngine,
        fabric: &mut EbitFabric,
        register: &Register,
    ) -> DistResult<RoundReport> {
        self.check(register)?;
        engine.apply_each(Gate::H, register.qubits())?;
        let report = self.mcz.apply(engine, fabric, register)?;
        engine.apply_each(Gate::H, register.qubits())?;
        Ok(report)
    }

    /// Oracle followed by diffuser.
    pub fn apply(
        &self,
        engine: &mut dyn AmplitudeEngine,
        fabric: &mut EbitFabric,
        register: &Register,
    ) -> DistResult<LayerReport> {
        let oracle = self.oracle(engine, fabric, register)?;
        let diffuser = self.diffuser(engine, fabric, register)?;
        trace!(
            strategy = self.mcz.name(),
            ebits = oracle.ebits + diffuser.ebits,
            "grover layer"
        );
        Ok(LayerReport { oracle, diffuser })
    }
}
