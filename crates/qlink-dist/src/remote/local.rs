//! Monolithic multi-controlled Z.

use tracing::trace;

use qlink_hal::AmplitudeEngine;
use qlink_ir::Gate;

use super::{DistributedMcz, RoundReport};
use crate::error::DistResult;
use crate::fabric::EbitFabric;
use crate::partition::PartitionPlan;
use crate::register::Register;

/// Applies the gate directly on the flattened register, ignoring node
/// boundaries. Used for single-node runs and as the reference the
/// distributed strategies are checked against.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalMcz;

impl DistributedMcz for LocalMcz {
    fn name(&self) -> &'static str {
        "local"
    }

    fn check(&self, _plan: &PartitionPlan) -> DistResult<()> {
        Ok(())
    }

    fn ebits_per_round(&self, _plan: &PartitionPlan) -> usize {
        0
    }

    fn apply(
        &self,
        engine: &mut dyn AmplitudeEngine,
        _fabric: &mut EbitFabric,
        register: &Register,
    ) -> DistResult<RoundReport> {
        if let Some((&target, controls)) = register.qubits().split_last() {
            trace!(controls = controls.len(), "local mcz");
            engine.apply(Gate::Z, controls, target)?;
        }
        Ok(RoundReport {
            strategy: self.name().into(),
            ..RoundReport::default()
        })
    }
}
