//! End-to-end tests for the distributed Grover driver.

use qlink_adapter_sim::SimulatorEngine;
use qlink_dist::{
    DistError, Driver, EbitFabric, GroverLayer, LocalMcz, Register, RunConfig, StrategyKind,
    plan,
};
use qlink_hal::{AmplitudeEngine, Capabilities, HalError, HalResult, StateSnapshot};
use qlink_ir::{Basis, Gate, QubitId};

fn config(target: &str) -> RunConfig {
    RunConfig::from_target_str(target).unwrap()
}

#[test]
fn test_eight_qubit_search_finds_target() {
    let driver = Driver::new(config("10110010").with_shots(20)).unwrap();
    assert_eq!(driver.plan().sizes(), &[5, 3]);
    assert_eq!(driver.layers(), 12);
    assert_eq!(driver.strategy_name(), "hub");

    let mut engine = SimulatorEngine::new().with_seed(2024);
    let report = driver.run(&mut engine).unwrap();

    assert_eq!(report.outputs.len(), 20);
    assert!(report.success_rate >= 0.9, "success rate {}", report.success_rate);
    assert!(report.found_target());
    assert_eq!(report.counts.total_shots(), 20);
    // Two rounds per layer, one ebit per node per round.
    assert_eq!(report.ebits_consumed, 20 * 12 * 2 * 2);
    assert_eq!(report.peak_live_qubits, 12);
    assert_eq!(engine.num_live_qubits(), 0);
}

#[test]
fn test_single_layer_forces_one_layer() {
    let driver = Driver::new(config("10110010").with_single_layer(true)).unwrap();
    assert_eq!(driver.layers(), 1);

    let mut engine = SimulatorEngine::new().with_seed(3);
    let mut calls = 0;
    let report = driver
        .run_with_progress(&mut engine, |progress| {
            calls += 1;
            assert_eq!(progress.total_layers, 1);
            assert_eq!(progress.ebits, 4);
        })
        .unwrap();
    assert_eq!(calls, 1);
    assert_eq!(report.layers, 1);
    assert_eq!(report.output().unwrap().len(), 8);
}

#[test]
fn test_single_node_run_uses_no_ebits() {
    let driver = Driver::new(config("101").with_max_nodes(1)).unwrap();
    assert!(driver.plan().is_single_node());
    assert_eq!(driver.strategy_name(), "local");

    let mut engine = SimulatorEngine::new().with_seed(5);
    let report = driver.run(&mut engine).unwrap();
    assert_eq!(report.ebits_consumed, 0);
    assert_eq!(report.peak_live_qubits, 3);
    assert_eq!(engine.num_slots(), 0);
}

#[test]
fn test_star_strategy_search() {
    let cfg = config("1011")
        .with_node_capacity(4)
        .with_max_nodes(1)
        .with_strategy(StrategyKind::Star)
        .with_shots(50);
    let driver = Driver::new(cfg).unwrap();
    assert_eq!(driver.strategy_name(), "star");
    assert_eq!(driver.layers(), 2);

    let mut engine = SimulatorEngine::new().with_seed(77);
    let report = driver.run(&mut engine).unwrap();
    // sin²(5·asin(1/4)) ≈ 0.908 per shot.
    assert!(report.success_rate >= 0.7, "success rate {}", report.success_rate);
    assert_eq!(report.ebits_consumed, 50 * 2 * 2 * 3);
}

#[test]
fn test_star_rejects_other_registers() {
    let cfg = config("10110").with_strategy(StrategyKind::Star);
    assert!(matches!(
        Driver::new(cfg),
        Err(DistError::UnsupportedGrouping { strategy: "star", .. })
    ));
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let driver = Driver::new(config("0110").with_node_capacity(2).with_shots(16)).unwrap();
    let a = driver.run(&mut SimulatorEngine::new().with_seed(9)).unwrap();
    let b = driver.run(&mut SimulatorEngine::new().with_seed(9)).unwrap();
    assert_eq!(a.outputs, b.outputs);
    assert_ne!(a.run_id, b.run_id);
}

#[test]
fn test_progress_reports_target_probability_at_high_verbosity() {
    let driver = Driver::new(config("10110010").with_verbosity(3)).unwrap();
    let mut engine = SimulatorEngine::new().with_seed(1);
    let mut probabilities = Vec::new();
    driver
        .run_with_progress(&mut engine, |progress| {
            probabilities.push(progress.target_probability.unwrap());
        })
        .unwrap();

    assert_eq!(probabilities.len(), 12);
    assert!(probabilities.windows(2).all(|w| w[1] > w[0]));
    assert!(*probabilities.last().unwrap() > 0.99);
}

#[test]
fn test_engine_ceiling_is_checked_before_allocation() {
    let driver = Driver::new(config("10110010")).unwrap();
    let mut engine = SimulatorEngine::with_max_qubits(10).with_seed(0);
    assert!(matches!(
        driver.run(&mut engine),
        Err(DistError::TooManyQubits {
            required: 12,
            ceiling: 10
        })
    ));
    assert_eq!(engine.num_live_qubits(), 0);
}

#[test]
fn test_configured_ceiling_is_checked_at_planning() {
    let cfg = config("10110010").with_max_sim_qubits(11);
    assert!(matches!(
        Driver::new(cfg),
        Err(DistError::TooManyQubits {
            required: 12,
            ceiling: 11
        })
    ));
}

#[test]
fn test_star_ceiling_counts_all_three_ebits() {
    let star = config("1011")
        .with_node_capacity(4)
        .with_max_nodes(1)
        .with_strategy(StrategyKind::Star);
    assert_eq!(Driver::new(star.clone()).unwrap().required_qubits(), 10);
    assert!(matches!(
        Driver::new(star.clone().with_max_sim_qubits(8)),
        Err(DistError::TooManyQubits {
            required: 10,
            ceiling: 8
        })
    ));

    // Two nodes of two: the hub needs 8, the star still needs 10.
    let split = star.with_node_capacity(2).with_max_nodes(2);
    assert_eq!(Driver::new(split.clone()).unwrap().required_qubits(), 10);
    let hub = split.with_strategy(StrategyKind::Hub);
    assert_eq!(Driver::new(hub).unwrap().required_qubits(), 8);
}

#[test]
fn test_star_engine_ceiling_is_checked_before_allocation() {
    let cfg = config("1011")
        .with_node_capacity(4)
        .with_max_nodes(1)
        .with_strategy(StrategyKind::Star);
    let driver = Driver::new(cfg).unwrap();
    let mut engine = SimulatorEngine::with_max_qubits(8).with_seed(0);
    assert!(matches!(
        driver.run(&mut engine),
        Err(DistError::TooManyQubits {
            required: 10,
            ceiling: 8
        })
    ));
    assert_eq!(engine.num_live_qubits(), 0);
}

/// Engine that advertises a higher qubit ceiling than its simulator enforces.
struct OverstatedEngine {
    inner: SimulatorEngine,
    capabilities: Capabilities,
}

impl AmplitudeEngine for OverstatedEngine {
    fn name(&self) -> &str {
        "overstated"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn num_live_qubits(&self) -> usize {
        self.inner.num_live_qubits()
    }

    fn allocate(&mut self, n: usize) -> HalResult<Vec<QubitId>> {
        self.inner.allocate(n)
    }

    fn free(&mut self, qubits: &[QubitId]) -> HalResult<()> {
        self.inner.free(qubits)
    }

    fn apply(&mut self, gate: Gate, controls: &[QubitId], target: QubitId) -> HalResult<()> {
        self.inner.apply(gate, controls, target)
    }

    fn measure(&mut self, qubit: QubitId, basis: Basis) -> HalResult<bool> {
        self.inner.measure(qubit, basis)
    }

    fn dump(&self, qubits: &[QubitId]) -> HalResult<StateSnapshot> {
        self.inner.dump(qubits)
    }
}

#[test]
fn test_failed_shot_releases_data_register() {
    let driver = Driver::new(config("1011").with_node_capacity(2)).unwrap();
    let mut engine = OverstatedEngine {
        inner: SimulatorEngine::with_max_qubits(5).with_seed(1),
        capabilities: Capabilities::simulator(20),
    };

    // Data fits, the first hub round's ebits do not.
    let err = driver.run(&mut engine).unwrap_err();
    assert!(matches!(
        err,
        DistError::Hal(HalError::QubitLimit {
            requested: 4,
            live: 4,
            max: 5
        })
    ));
    assert_eq!(engine.num_live_qubits(), 0);

    // The engine is clean, so a retry fails the same way rather than on the ceiling check.
    assert!(matches!(driver.run(&mut engine), Err(DistError::Hal(_))));
    assert_eq!(engine.num_live_qubits(), 0);
}

#[test]
fn test_layer_rejects_mismatched_register() {
    let target = "1011".parse().unwrap();
    let layer = GroverLayer::new(&target, &LocalMcz);
    let mut engine = SimulatorEngine::new().with_seed(0);
    let mut fabric = EbitFabric::new();
    let register = Register::allocate(&mut engine, &plan(3, 3, 1).unwrap()).unwrap();
    assert!(matches!(
        layer.apply(&mut engine, &mut fabric, &register),
        Err(DistError::LengthMismatch {
            expected: 4,
            got: 3
        })
    ));
}

#[test]
fn test_report_serializes() {
    let driver = Driver::new(config("011").with_node_capacity(2)).unwrap();
    let report = driver.run(&mut SimulatorEngine::new().with_seed(4)).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["target"], "011");
    assert_eq!(json["plan"], serde_json::json!([2, 1]));
    assert_eq!(json["strategy"], "hub");
}
