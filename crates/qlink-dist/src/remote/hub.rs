//! Hub strategy: one ebit per node, joined at a router.
//!
//! For node `i` with local group `G_i` and ebit `(e_i, r_i)`:
//!
//! 1. CZ from all of `G_i` onto `e_i`, then H on `r_i`.
//! 2. Measure `e_i` in the X basis; on `1`, X on `r_i`. `r_i` now holds
//!    `AND(G_i)` in the computational basis.
//! 3. One multi-controlled Z across all routers (target `r_0`).
//! 4. Measure `r_i` in the X basis; on `1`, the same CZ over `G_i` undoes
//!    the phase kicked back onto the node.
//! 5. Release every ebit.

use tracing::trace;

use qlink_hal::AmplitudeEngine;
use qlink_ir::{Basis, Gate, QubitId};

use super::{DistributedMcz, RoundReport};
use crate::error::DistResult;
use crate::fabric::EbitFabric;
use crate::partition::PartitionPlan;
use crate::register::Register;

/// Generalised router hub over any node grouping.
#[derive(Debug, Clone, Copy, Default)]
pub struct HubMcz;

/// Phase flip on the all-ones state of `group`, plus `extra` if given.
fn group_z(
    engine: &mut dyn AmplitudeEngine,
    group: &[QubitId],
    extra: Option<QubitId>,
) -> DistResult<()> {
    match (extra, group.split_last()) {
        (Some(target), _) => engine.apply(Gate::Z, group, target)?,
        (None, Some((&target, controls))) => engine.apply(Gate::Z, controls, target)?,
        (None, None) => {}
    }
    Ok(())
}

impl DistributedMcz for HubMcz {
    fn name(&self) -> &'static str {
        "hub"
    }

    fn check(&self, _plan: &PartitionPlan) -> DistResult<()> {
        Ok(())
    }

    fn ebits_per_round(&self, plan: &PartitionPlan) -> usize {
        plan.node_count()
    }

    fn apply(
        &self,
        engine: &mut dyn AmplitudeEngine,
        fabric: &mut EbitFabric,
        register: &Register,
    ) -> DistResult<RoundReport> {
        let ebits = fabric.prepare(engine, register.node_count())?;

        for (group, ebit) in register.nodes().zip(&ebits) {
            group_z(engine, group, Some(ebit.local))?;
            engine.apply(Gate::H, &[], ebit.router)?;
        }

        let mut corrections = 0;
        let mut local_outcomes = Vec::with_capacity(ebits.len());
        for ebit in &ebits {
            let outcome = engine.measure(ebit.local, Basis::X)?;
            if outcome {
                engine.apply(Gate::X, &[], ebit.router)?;
                corrections += 1;
            }
            local_outcomes.push(outcome);
        }

        let routers: Vec<QubitId> = ebits.iter().map(|e| e.router).collect();
        if let Some((&hub, spokes)) = routers.split_first() {
            engine.apply(Gate::Z, spokes, hub)?;
        }

        let mut router_outcomes = Vec::with_capacity(ebits.len());
        for (group, ebit) in register.nodes().zip(&ebits) {
            let outcome = engine.measure(ebit.router, Basis::X)?;
            if outcome {
                group_z(engine, group, None)?;
                corrections += 1;
            }
            router_outcomes.push(outcome);
        }

        let ebit_count = ebits.len();
        fabric.release(engine, ebits)?;
        trace!(
            ebits = ebit_count,
            ?local_outcomes,
            ?router_outcomes,
            corrections,
            "hub mcz round"
        );

        Ok(RoundReport {
            strategy: self.name().into(),
            ebits: ebit_count,
            local_outcomes,
            router_outcomes,
            corrections,
        })
    }
}
