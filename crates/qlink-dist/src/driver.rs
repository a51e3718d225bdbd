//! Distributed Grover search driver.
//!
//! The [`Driver`] owns a validated [`RunConfig`], the partition plan derived
//! from it and the selected multi-controlled-Z strategy. Each shot runs on a
//! fresh register:
//!
//! ```text
//!   allocate ──→ X, H on every qubit ──→ layer × L ──→ measure ──→ release
//! ```

use std::f64::consts::FRAC_PI_4;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use uuid::Uuid;

use qlink_hal::{AmplitudeEngine, Counts};
use qlink_ir::{Bitstring, Gate};

use crate::config::RunConfig;
use crate::error::{DistError, DistResult};
use crate::fabric::EbitFabric;
use crate::layer::GroverLayer;
use crate::partition::{PartitionPlan, plan};
use crate::register::Register;
use crate::remote::DistributedMcz;

/// Optimal number of Grover layers for an `num_qubits`-qubit register.
///
/// `floor(π/4 · √(2ⁿ) − 0.5)`, clamped at zero, or exactly one when
/// `single_layer` is set.
///
/// ```rust
/// use qlink_dist::driver::iteration_count;
///
/// assert_eq!(iteration_count(8, false), 12);
/// assert_eq!(iteration_count(8, true), 1);
/// ```
pub fn iteration_count(num_qubits: usize, single_layer: bool) -> usize {
    if single_layer {
        return 1;
    }
    let amplitude = (num_qubits as f64).exp2().sqrt();
    (FRAC_PI_4 * amplitude - 0.5).floor().max(0.0) as usize
}

/// Qubits simulated concurrently by `plan`, or `TooManyQubits` above `ceiling`.
pub fn resource_check(plan: &PartitionPlan, ceiling: usize) -> DistResult<usize> {
    check_ceiling(plan.concurrent_qubits(), ceiling)
}

/// Like [`resource_check`], but counting the ebits `mcz` actually holds per
/// round. Never less than [`PartitionPlan::concurrent_qubits`].
pub fn strategy_resource_check(
    plan: &PartitionPlan,
    mcz: &dyn DistributedMcz,
    ceiling: usize,
) -> DistResult<usize> {
    let strategy_qubits = plan.total_qubits() + 2 * mcz.ebits_per_round(plan);
    check_ceiling(plan.concurrent_qubits().max(strategy_qubits), ceiling)
}

fn check_ceiling(required: usize, ceiling: usize) -> DistResult<usize> {
    if required > ceiling {
        return Err(DistError::TooManyQubits { required, ceiling });
    }
    Ok(required)
}

/// Progress notification emitted after every layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerProgress {
    /// Zero-based shot index.
    pub shot: u32,
    /// One-based index of the layer just completed.
    pub layer: usize,
    /// Layers per shot.
    pub total_layers: usize,
    /// Ebits consumed by this layer.
    pub ebits: usize,
    /// Probability of the target after this layer. Only computed at
    /// verbosity 3 and above.
    pub target_probability: Option<f64>,
}

/// Aggregated result of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique run identifier.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Searched-for pattern.
    pub target: Bitstring,
    /// Node sizes.
    pub plan: Vec<usize>,
    /// Layers per shot.
    pub layers: usize,
    /// Strategy used for every multi-controlled Z.
    pub strategy: String,
    /// Shots executed.
    pub shots: u32,
    /// Measured output of each shot, in order.
    pub outputs: Vec<Bitstring>,
    /// Histogram of the outputs.
    pub counts: Counts,
    /// Fraction of shots that measured the target.
    pub success_rate: f64,
    /// Ebits consumed across all shots.
    pub ebits_consumed: u64,
    /// Largest number of live engine qubits observed.
    pub peak_live_qubits: usize,
    /// Wall-clock duration in milliseconds.
    pub elapsed_ms: u64,
}

impl RunReport {
    /// Output of the first shot.
    pub fn output(&self) -> Option<&Bitstring> {
        self.outputs.first()
    }

    /// True if the most frequent output is the target.
    pub fn found_target(&self) -> bool {
        self.counts
            .most_frequent()
            .is_some_and(|(bits, _)| bits == self.target.to_string())
    }
}

/// Runs distributed Grover search for one configuration.
pub struct Driver {
    config: RunConfig,
    plan: PartitionPlan,
    mcz: Box<dyn DistributedMcz>,
    layers: usize,
    required_qubits: usize,
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("target", &self.config.target)
            .field("plan", &self.plan.sizes())
            .field("strategy", &self.mcz.name())
            .field("layers", &self.layers)
            .finish()
    }
}

impl Driver {
    /// Validate `config`, plan the partition and pick the strategy.
    ///
    /// Every planning and resource error surfaces here, before any qubit is
    /// allocated.
    pub fn new(config: RunConfig) -> DistResult<Self> {
        config.validate()?;
        let plan = plan(config.target.len(), config.node_capacity, config.max_nodes)?;
        let mcz = config.strategy.select(&plan)?;
        let required_qubits =
            strategy_resource_check(&plan, mcz.as_ref(), config.max_sim_qubits)?;
        let layers = iteration_count(config.target.len(), config.single_layer);

        debug!(
            pattern = %config.target,
            plan = ?plan.sizes(),
            strategy = mcz.name(),
            layers,
            required_qubits,
            "driver ready"
        );

        Ok(Self {
            config,
            plan,
            mcz,
            layers,
            required_qubits,
        })
    }

    /// Configuration this driver was built from.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Partition plan.
    pub fn plan(&self) -> &PartitionPlan {
        &self.plan
    }

    /// Layers per shot.
    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Name of the selected multi-controlled-Z strategy.
    pub fn strategy_name(&self) -> &'static str {
        self.mcz.name()
    }

    /// Concurrent qubits a shot needs.
    pub fn required_qubits(&self) -> usize {
        self.required_qubits
    }

    /// Run every shot without progress reporting.
    pub fn run(&self, engine: &mut dyn AmplitudeEngine) -> DistResult<RunReport> {
        self.run_with_progress(engine, |_| {})
    }

    /// Run every shot, calling `on_layer` after each completed layer.
    #[instrument(skip(self, engine, on_layer), fields(pattern = %self.config.target, shots = self.config.shots))]
    pub fn run_with_progress(
        &self,
        engine: &mut dyn AmplitudeEngine,
        mut on_layer: impl FnMut(LayerProgress),
    ) -> DistResult<RunReport> {
        let ceiling = engine.capabilities().max_qubits;
        let required = engine.num_live_qubits() + self.required_qubits;
        if required > ceiling {
            return Err(DistError::TooManyQubits { required, ceiling });
        }

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let start = Instant::now();
        let mut fabric = EbitFabric::new();
        let mut outputs = Vec::with_capacity(self.config.shots as usize);
        let mut counts = Counts::new();

        if self.config.verbosity >= 1 {
            info!(
                %run_id,
                engine = engine.name(),
                plan = ?self.plan.sizes(),
                strategy = self.mcz.name(),
                layers = self.layers,
                "starting distributed search"
            );
        }

        for shot in 0..self.config.shots {
            let output = self.run_shot(engine, &mut fabric, shot, &mut on_layer)?;
            counts.insert(output.to_string(), 1);
            outputs.push(output);
        }

        let hits = outputs.iter().filter(|o| **o == self.config.target).count();
        let success_rate = hits as f64 / f64::from(self.config.shots);
        let stats = fabric.stats();
        let elapsed_ms = start.elapsed().as_millis() as u64;

        info!(
            %run_id,
            success_rate,
            ebits = stats.prepared,
            elapsed_ms,
            "distributed search finished"
        );

        Ok(RunReport {
            run_id,
            started_at,
            target: self.config.target.clone(),
            plan: self.plan.sizes().to_vec(),
            layers: self.layers,
            strategy: self.mcz.name().to_string(),
            shots: self.config.shots,
            outputs,
            counts,
            success_rate,
            ebits_consumed: stats.prepared,
            peak_live_qubits: stats.peak_live_qubits.max(self.plan.total_qubits()),
            elapsed_ms,
        })
    }

    /// Run one shot on a fresh register and return the measured bitstring.
    ///
    /// The register is released whether or not the shot succeeds.
    pub fn run_shot(
        &self,
        engine: &mut dyn AmplitudeEngine,
        fabric: &mut EbitFabric,
        shot: u32,
        on_layer: &mut dyn FnMut(LayerProgress),
    ) -> DistResult<Bitstring> {
        let register = Register::allocate(engine, &self.plan)?;
        match self.search(engine, fabric, &register, shot, on_layer) {
            Ok(output) => {
                register.release(engine)?;
                debug!(shot, %output, "shot measured");
                Ok(output)
            }
            Err(err) => {
                if let Err(cleanup) = register.release(engine) {
                    warn!(shot, error = %cleanup, "could not release data register");
                }
                Err(err)
            }
        }
    }

    fn search(
        &self,
        engine: &mut dyn AmplitudeEngine,
        fabric: &mut EbitFabric,
        register: &Register,
        shot: u32,
        on_layer: &mut dyn FnMut(LayerProgress),
    ) -> DistResult<Bitstring> {
        engine.apply_each(Gate::X, register.qubits())?;
        engine.apply_each(Gate::H, register.qubits())?;

        let layer = GroverLayer::new(&self.config.target, self.mcz.as_ref());
        for index in 1..=self.layers {
            let report = layer.apply(engine, fabric, register)?;
            let target_probability = if self.config.verbosity >= 3 {
                let snapshot = engine.dump(register.qubits())?;
                Some(snapshot.probability_of(&self.config.target)?)
            } else {
                None
            };

            if self.config.verbosity >= 2 {
                info!(shot, layer = index, ebits = report.ebits(), ?target_probability, "layer done");
            } else {
                trace!(shot, layer = index, ebits = report.ebits(), "layer done");
            }

            on_layer(LayerProgress {
                shot,
                layer: index,
                total_layers: self.layers,
                ebits: report.ebits(),
                target_probability,
            });
        }

        register.measure_all(engine)
    }
}
