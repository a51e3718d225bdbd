//! Star strategy for the legacy 3-control + 1-target block.
//!
//! Each control party shares one ebit with the party holding the target; the
//! router halves sit next to the target. A control is copied onto its router
//! half (CNOT into the local half, standard-basis measurement, X fix-up),
//! the router halves then act as controls for a local CCCZ on the target,
//! and an X-basis measurement of each router half decides whether the
//! control needs a Z fix-up.

use tracing::trace;

use qlink_hal::AmplitudeEngine;
use qlink_ir::{Basis, Gate, QubitId};

use super::{DistributedMcz, RoundReport};
use crate::error::{DistError, DistResult};
use crate::fabric::EbitFabric;
use crate::partition::PartitionPlan;
use crate::register::Register;

const PARTIES: usize = 4;

/// Pairwise star over exactly three controls and one target.
#[derive(Debug, Clone, Copy, Default)]
pub struct StarMcz;

impl DistributedMcz for StarMcz {
    fn name(&self) -> &'static str {
        "star"
    }

    fn check(&self, plan: &PartitionPlan) -> DistResult<()> {
        if plan.total_qubits() != PARTIES {
            return Err(DistError::UnsupportedGrouping {
                strategy: self.name(),
                reason: format!(
                    "needs exactly {PARTIES} qubits (3 controls + 1 target), register has {}",
                    plan.total_qubits()
                ),
            });
        }
        Ok(())
    }

    fn ebits_per_round(&self, _plan: &PartitionPlan) -> usize {
        PARTIES - 1
    }

    fn apply(
        &self,
        engine: &mut dyn AmplitudeEngine,
        fabric: &mut EbitFabric,
        register: &Register,
    ) -> DistResult<RoundReport> {
        let (&target, controls) = match register.qubits().split_last() {
            Some(split) if register.len() == PARTIES => split,
            _ => {
                return Err(DistError::LengthMismatch {
                    expected: PARTIES,
                    got: register.len(),
                });
            }
        };

        let ebits = fabric.prepare(engine, controls.len())?;
        let mut corrections = 0;

        let mut local_outcomes = Vec::with_capacity(ebits.len());
        for (&control, ebit) in controls.iter().zip(&ebits) {
            engine.apply(Gate::X, &[control], ebit.local)?;
            let outcome = engine.measure(ebit.local, Basis::Standard)?;
            if outcome {
                engine.apply(Gate::X, &[], ebit.router)?;
                corrections += 1;
            }
            local_outcomes.push(outcome);
        }

        let routers: Vec<QubitId> = ebits.iter().map(|e| e.router).collect();
        engine.apply(Gate::Z, &routers, target)?;

        let mut router_outcomes = Vec::with_capacity(ebits.len());
        for (&control, ebit) in controls.iter().zip(&ebits) {
            let outcome = engine.measure(ebit.router, Basis::X)?;
            if outcome {
                engine.apply(Gate::Z, &[], control)?;
                corrections += 1;
            }
            router_outcomes.push(outcome);
        }

        let ebit_count = ebits.len();
        fabric.release(engine, ebits)?;
        trace!(ebits = ebit_count, corrections, "star mcz round");

        Ok(RoundReport {
            strategy: self.name().into(),
            ebits: ebit_count,
            local_outcomes,
            router_outcomes,
            corrections,
        })
    }
}
