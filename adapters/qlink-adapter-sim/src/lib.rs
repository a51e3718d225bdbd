//! qlink Local Statevector Engine
//!
//! This crate provides the amplitude engine the distributed protocols run
//! against. It keeps one dense statevector over a pool of qubit slots and
//! grows or shrinks it as qubits are allocated and freed, so ebit halves that
//! live for a single protocol round do not permanently double the memory.
//!
//! # Features
//!
//! - **Exact Simulation**: full statevector, no sampling noise in gates
//! - **Controlled Gates**: X, Z and H with any number of controls
//! - **Collapse**: standard- and X-basis measurement with renormalisation
//! - **Seedable**: `with_seed` makes every measurement reproducible
//!
//! # Performance
//!
//! | Live qubits | Memory | Per-gate cost |
//! |-------------|--------|---------------|
//! | 12 | ~64 KB | Instant |
//! | 16 | ~1 MB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 24 | ~256 MB | Slow |
//!
//! # Example
//!
//! ```rust
//! use qlink_adapter_sim::SimulatorEngine;
//! use qlink_hal::AmplitudeEngine;
//! use qlink_ir::{Basis, Gate};
//!
//! let mut engine = SimulatorEngine::new().with_seed(7);
//! let q = engine.allocate(2).unwrap();
//!
//! // Bell pair: the two outcomes always agree.
//! engine.apply(Gate::H, &[], q[0]).unwrap();
//! engine.apply(Gate::X, &[q[0]], q[1]).unwrap();
//! let a = engine.measure(q[0], Basis::Standard).unwrap();
//! let b = engine.measure(q[1], Basis::Standard).unwrap();
//! assert_eq!(a, b);
//!
//! engine.release(&q).unwrap();
//! assert_eq!(engine.num_live_qubits(), 0);
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorEngine;
