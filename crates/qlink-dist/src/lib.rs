//! Distributed Grover search over a partitioned register.
//!
//! A register that does not fit on one simulated QPU is split across nodes
//! by the [partition planner](partition). Gates that span nodes are realised
//! with shared entangled pairs ([ebits](fabric)), local operations,
//! measurements and classically controlled corrections ([`remote`]). The
//! [`GroverLayer`] builds oracle and diffuser on top of one distributed
//! multi-controlled Z, and the [`Driver`] runs the whole search.
//!
//! # Example
//!
//! ```rust
//! use qlink_adapter_sim::SimulatorEngine;
//! use qlink_dist::{Driver, RunConfig};
//!
//! let config = RunConfig::from_target_str("1011")
//!     .unwrap()
//!     .with_node_capacity(2)
//!     .with_max_nodes(2);
//! let driver = Driver::new(config).unwrap();
//! assert_eq!(driver.plan().sizes(), &[2, 2]);
//!
//! let mut engine = SimulatorEngine::new().with_seed(7);
//! let report = driver.run(&mut engine).unwrap();
//! assert_eq!(report.outputs.len(), 1);
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod fabric;
pub mod layer;
pub mod parity;
pub mod partition;
pub mod register;
pub mod remote;

pub use config::RunConfig;
pub use driver::{
    Driver, LayerProgress, RunReport, iteration_count, resource_check, strategy_resource_check,
};
pub use error::{DistError, DistResult};
pub use fabric::{Ebit, EbitFabric, FabricStats};
pub use layer::{GroverLayer, LayerReport};
pub use parity::parity;
pub use partition::{PartitionPlan, plan};
pub use register::Register;
pub use remote::{
    CorrectionRecord, DistributedMcz, HubMcz, LocalMcz, RoundReport, StarMcz, StrategyKind,
    remote_cnot, remote_cnot_pairs,
};
