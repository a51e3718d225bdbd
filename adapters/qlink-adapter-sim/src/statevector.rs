//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use qlink_ir::Gate;

/// Below this probability a branch is treated as empty.
const PROBABILITY_EPSILON: f64 = 1e-10;

/// A statevector over a growable pool of qubit slots.
///
/// Slot `k` is bit `k` of the amplitude index. Free slots are always `|0⟩`,
/// so every amplitude with a free slot's bit set is zero.
pub struct Statevector {
    /// The state amplitudes (2^num_slots complex numbers).
    amplitudes: Vec<Complex64>,
    /// Liveness per slot.
    live: Vec<bool>,
    /// Source of measurement randomness.
    rng: StdRng,
}

impl Statevector {
    /// Create an empty statevector (no slots) in the trivial state.
    pub fn new(rng: StdRng) -> Self {
        Self {
            amplitudes: vec![Complex64::new(1.0, 0.0)],
            live: Vec::new(),
            rng,
        }
    }

    /// Create an empty statevector with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Number of slots (live or free) spanned by the amplitude index.
    pub fn num_slots(&self) -> usize {
        self.live.len()
    }

    /// Number of live slots.
    pub fn num_live(&self) -> usize {
        self.live.iter().filter(|l| **l).count()
    }

    /// Whether `slot` is live.
    pub fn is_live(&self, slot: usize) -> bool {
        self.live.get(slot).copied().unwrap_or(false)
    }

    // =========================================================================
    // Slot management
    // =========================================================================

    /// Claim the lowest free slot, growing the vector if none is free.
    pub fn claim_slot(&mut self) -> usize {
        if let Some(slot) = self.live.iter().position(|l| !*l) {
            self.live[slot] = true;
            return slot;
        }
        // New top bit starts in |0⟩: the upper half of the index space is empty.
        let len = self.amplitudes.len();
        self.amplitudes.resize(len * 2, Complex64::new(0.0, 0.0));
        self.live.push(true);
        self.live.len() - 1
    }

    /// Mark `slot` free. The caller has already checked it is `|0⟩`.
    pub fn release_slot(&mut self, slot: usize) {
        self.project(slot, false);
        self.live[slot] = false;
        self.shrink();
    }

    /// Drop free slots from the top of the index space.
    fn shrink(&mut self) {
        while self.live.last() == Some(&false) {
            self.live.pop();
            let half = self.amplitudes.len() / 2;
            self.amplitudes.truncate(half);
        }
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply `gate` on `target`, conditioned on every slot in `controls`.
    pub fn apply_gate(&mut self, gate: Gate, controls: &[usize], target: usize) {
        let ctrl_mask = controls.iter().fold(0usize, |m, c| m | (1 << c));
        match gate {
            Gate::X => self.apply_x(ctrl_mask, target),
            Gate::Z => self.apply_z(ctrl_mask, target),
            Gate::H => self.apply_h(ctrl_mask, target),
        }
    }

    fn apply_x(&mut self, ctrl_mask: usize, target: usize) {
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask == ctrl_mask) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_z(&mut self, ctrl_mask: usize, target: usize) {
        let mask = ctrl_mask | (1 << target);
        for i in 0..self.amplitudes.len() {
            if i & mask == mask {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_h(&mut self, ctrl_mask: usize, target: usize) {
        let tgt_mask = 1 << target;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask == ctrl_mask) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Probability that `slot` reads `1`.
    pub fn probability_one(&self, slot: usize) -> f64 {
        let mask = 1 << slot;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Whether `slot` is `|0⟩` up to rounding.
    pub fn is_zero(&self, slot: usize) -> bool {
        self.probability_one(slot) < PROBABILITY_EPSILON
    }

    /// Measure `slot` in the computational basis and collapse.
    pub fn measure(&mut self, slot: usize) -> bool {
        let p1 = self.probability_one(slot);
        let r: f64 = self.rng.r#gen();
        let outcome = r < p1;
        self.project(slot, outcome);
        outcome
    }

    /// Project `slot` onto `outcome` and renormalise.
    fn project(&mut self, slot: usize, outcome: bool) {
        let mask = 1 << slot;
        let mut norm_sq = 0.0;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) != outcome {
                *amp = Complex64::new(0.0, 0.0);
            } else {
                norm_sq += amp.norm_sqr();
            }
        }
        let norm = norm_sq.sqrt();
        if norm > 0.0 {
            for amp in &mut self.amplitudes {
                *amp /= norm;
            }
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Amplitudes over `slots`, conditioned on every other slot being `0`.
    pub fn amplitudes_over(&self, slots: &[usize]) -> Vec<Complex64> {
        let covered = slots.iter().fold(0usize, |m, s| m | (1 << s));
        let mut out = vec![Complex64::new(0.0, 0.0); 1 << slots.len()];
        for (i, amp) in self.amplitudes.iter().enumerate() {
            if i & !covered != 0 {
                continue;
            }
            let sub = slots
                .iter()
                .enumerate()
                .fold(0usize, |acc, (k, s)| acc | (((i >> s) & 1) << k));
            out[sub] = *amp;
        }
        out
    }
}
