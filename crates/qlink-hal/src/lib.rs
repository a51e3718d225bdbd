//! qlink Engine Abstraction Layer
//!
//! This crate defines the boundary between the distributed protocols and the
//! component that actually owns simulated amplitudes. The protocols never
//! touch amplitudes directly: they allocate opaque [`QubitId`] handles, apply
//! gates, and read back measurement bits through the [`AmplitudeEngine`]
//! trait.
//!
//! # Overview
//!
//! - Lifecycle via [`AmplitudeEngine`]: `allocate` → `apply`/`measure` →
//!   `reset` → `free`
//! - Introspection via [`Capabilities`] (qubit ceiling, seeding)
//! - Debug inspection via [`StateSnapshot`], never required for correctness
//! - Shot aggregation via [`Counts`]
//!
//! [`QubitId`]: qlink_ir::QubitId

pub mod capability;
pub mod engine;
pub mod error;
pub mod result;
pub mod snapshot;

pub use capability::Capabilities;
pub use engine::AmplitudeEngine;
pub use error::{HalError, HalResult};
pub use result::Counts;
pub use snapshot::StateSnapshot;
