//! Entanglement-assisted remote CNOT between two parties.
//!
//! Party A holds the control, party B the target. Each party shares one ebit
//! with the router: `(eA, rA)` and `(eB, rB)`.
//!
//! ```text
//!   a ──●──────────────────────────── Z^(eB ⊕ rA)
//!       │
//!  eA ──⊕──────────── M_z
//!  rA ────────●────── M_x
//!             │
//!  rB ────────⊕────── M_z
//!  eB ──●──────────── M_x
//!       │
//!   b ──⊕──────────────────────────── X^(rB ⊕ eA)
//! ```
//!
//! The router CNOT `rA → rB` is the only step that treats two remote halves
//! as co-located.

use serde::{Deserialize, Serialize};
use tracing::trace;

use qlink_hal::AmplitudeEngine;
use qlink_ir::{Basis, Gate, QubitId};

use crate::error::{DistError, DistResult};
use crate::fabric::EbitFabric;
use crate::parity::parity;

/// Measured bits of one remote CNOT and the corrections they triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionRecord {
    /// Control-side local half, standard basis.
    pub control_local: bool,
    /// Control-side router half, X basis.
    pub control_router: bool,
    /// Target-side local half, X basis.
    pub target_local: bool,
    /// Target-side router half, standard basis.
    pub target_router: bool,
    /// Whether the X correction was applied to the target.
    pub target_flipped: bool,
    /// Whether the Z correction was applied to the control.
    pub control_phased: bool,
}

/// Apply CNOT(`control` → `target`) between two parties through the router.
pub fn remote_cnot(
    engine: &mut dyn AmplitudeEngine,
    fabric: &mut EbitFabric,
    control: QubitId,
    target: QubitId,
) -> DistResult<CorrectionRecord> {
    if control == target {
        return Err(qlink_hal::HalError::DuplicateQubit(control).into());
    }

    let ebits = fabric.prepare(engine, 2)?;
    let (e_a, r_a) = (ebits[0].local, ebits[0].router);
    let (e_b, r_b) = (ebits[1].local, ebits[1].router);

    engine.apply(Gate::X, &[control], e_a)?;
    engine.apply(Gate::X, &[e_b], target)?;
    engine.apply(Gate::X, &[r_a], r_b)?;

    let mut record = CorrectionRecord {
        target_router: engine.measure(r_b, Basis::Standard)?,
        control_local: engine.measure(e_a, Basis::Standard)?,
        target_local: engine.measure(e_b, Basis::X)?,
        control_router: engine.measure(r_a, Basis::X)?,
        ..CorrectionRecord::default()
    };

    if parity(&[record.target_router, record.control_local]) {
        engine.apply(Gate::X, &[], target)?;
        record.target_flipped = true;
    }
    if parity(&[record.target_local, record.control_router]) {
        engine.apply(Gate::Z, &[], control)?;
        record.control_phased = true;
    }

    fabric.release(engine, ebits)?;
    trace!(%control, target_qubit = %target, ?record, "remote cnot");
    Ok(record)
}

/// Apply a remote CNOT for each `(controls[i], targets[i])` pair in order.
pub fn remote_cnot_pairs(
    engine: &mut dyn AmplitudeEngine,
    fabric: &mut EbitFabric,
    controls: &[QubitId],
    targets: &[QubitId],
) -> DistResult<Vec<CorrectionRecord>> {
    if controls.len() != targets.len() {
        return Err(DistError::LengthMismatch {
            expected: controls.len(),
            got: targets.len(),
        });
    }
    controls
        .iter()
        .zip(targets)
        .map(|(&c, &t)| remote_cnot(engine, fabric, c, t))
        .collect()
}
