//! Debug snapshots of engine state.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use qlink_ir::{Bitstring, QubitId};

use crate::error::{HalError, HalResult};

/// Amplitudes over an ordered list of qubits.
///
/// Basis index bit `i` corresponds to `qubits[i]`, so amplitude `k` belongs
/// to the computational state whose `i`-th qubit is `(k >> i) & 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Qubits the snapshot covers, in index-bit order.
    pub qubits: Vec<QubitId>,
    /// `2^qubits.len()` amplitudes.
    pub amplitudes: Vec<Complex64>,
}

impl StateSnapshot {
    /// Build a snapshot, checking the amplitude count.
    pub fn new(qubits: Vec<QubitId>, amplitudes: Vec<Complex64>) -> HalResult<Self> {
        if amplitudes.len() != 1usize << qubits.len() {
            return Err(HalError::InvalidSnapshot(format!(
                "{} qubits need {} amplitudes, got {}",
                qubits.len(),
                1usize << qubits.len(),
                amplitudes.len()
            )));
        }
        Ok(Self { qubits, amplitudes })
    }

    /// Number of qubits covered.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Squared norm; `1.0` when the covered qubits are unentangled from the rest.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Outcome probabilities per basis index.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Probability of measuring `bits` (bit `i` ↔ `qubits[i]`).
    pub fn probability_of(&self, bits: &Bitstring) -> HalResult<f64> {
        if bits.len() != self.num_qubits() {
            return Err(HalError::InvalidSnapshot(format!(
                "bitstring has {} bits, snapshot covers {} qubits",
                bits.len(),
                self.num_qubits()
            )));
        }
        let index = bits
            .iter()
            .enumerate()
            .fold(0usize, |acc, (i, b)| if b { acc | (1 << i) } else { acc });
        Ok(self.amplitudes[index].norm_sqr())
    }

    /// Pure-state fidelity `|⟨self|other⟩|²`, insensitive to global phase.
    pub fn fidelity(&self, other: &StateSnapshot) -> HalResult<f64> {
        if self.amplitudes.len() != other.amplitudes.len() {
            return Err(HalError::InvalidSnapshot(format!(
                "cannot compare {}-qubit and {}-qubit snapshots",
                self.num_qubits(),
                other.num_qubits()
            )));
        }
        let overlap: Complex64 = self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum();
        Ok(overlap.norm_sqr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plus() -> StateSnapshot {
        let s = 1.0 / 2.0_f64.sqrt();
        StateSnapshot::new(
            vec![QubitId(0)],
            vec![Complex64::new(s, 0.0), Complex64::new(s, 0.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_amplitude_count_checked() {
        let err = StateSnapshot::new(vec![QubitId(0), QubitId(1)], vec![Complex64::new(1.0, 0.0)]);
        assert!(matches!(err, Err(HalError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_fidelity_ignores_global_phase() {
        let a = plus();
        let mut b = plus();
        for amp in &mut b.amplitudes {
            *amp *= Complex64::new(0.0, -1.0);
        }
        assert!((a.fidelity(&b).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_probability_of() {
        let a = plus();
        let one: Bitstring = "1".parse().unwrap();
        assert!((a.probability_of(&one).unwrap() - 0.5).abs() < 1e-12);
        assert!((a.norm_sqr() - 1.0).abs() < 1e-12);
    }
}
