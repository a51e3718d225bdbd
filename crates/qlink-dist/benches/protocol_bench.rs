//! Benchmarks for the distributed protocols
//!
//! Run with: cargo bench -p qlink-dist

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qlink_adapter_sim::SimulatorEngine;
use qlink_dist::{
    DistributedMcz, Driver, EbitFabric, HubMcz, LocalMcz, Register, RunConfig, plan,
    remote_cnot,
};
use qlink_hal::AmplitudeEngine;
use qlink_ir::Gate;

/// Benchmark one multi-controlled-Z round, monolithic vs. hub
fn bench_mcz_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcz_round");

    for (total, capacity) in [(4, 2), (8, 5), (9, 3)] {
        let p = plan(total, capacity, capacity).unwrap();
        let label = format!("{total}q_{}n", p.node_count());

        group.bench_with_input(BenchmarkId::new("local", &label), &p, |b, p| {
            let mut engine = SimulatorEngine::new().with_seed(0);
            let mut fabric = EbitFabric::new();
            let register = Register::allocate(&mut engine, p).unwrap();
            engine.apply_each(Gate::H, register.qubits()).unwrap();
            b.iter(|| {
                LocalMcz
                    .apply(&mut engine, &mut fabric, black_box(&register))
                    .unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("hub", &label), &p, |b, p| {
            let mut engine = SimulatorEngine::new().with_seed(0);
            let mut fabric = EbitFabric::new();
            let register = Register::allocate(&mut engine, p).unwrap();
            engine.apply_each(Gate::H, register.qubits()).unwrap();
            b.iter(|| {
                HubMcz
                    .apply(&mut engine, &mut fabric, black_box(&register))
                    .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark a single remote CNOT
fn bench_remote_cnot(c: &mut Criterion) {
    c.bench_function("remote_cnot", |b| {
        let mut engine = SimulatorEngine::new().with_seed(0);
        let mut fabric = EbitFabric::new();
        let q = engine.allocate(2).unwrap();
        engine.apply(Gate::H, &[], q[0]).unwrap();
        b.iter(|| remote_cnot(&mut engine, &mut fabric, black_box(q[0]), black_box(q[1])).unwrap());
    });
}

/// Benchmark a full single-shot search
fn bench_driver_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("driver_run");
    group.sample_size(10);

    for target in ["1011", "101101", "10110010"] {
        let driver = Driver::new(RunConfig::from_target_str(target).unwrap().with_node_capacity(3))
            .unwrap();
        group.bench_with_input(BenchmarkId::new("hub", target.len()), &driver, |b, driver| {
            let mut engine = SimulatorEngine::new().with_seed(0);
            b.iter(|| driver.run(&mut engine).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_mcz_round, bench_remote_cnot, bench_driver_run);
criterion_main!(benches);
