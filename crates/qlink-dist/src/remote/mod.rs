//! Entanglement-assisted remote gates.
//!
//! Every protocol here follows the same causal pattern: prepare ebits, apply
//! local entangling gates, measure, and only then apply the classically
//! controlled corrections those measurements call for. Ebits never outlive
//! the call that prepared them.
//!
//! The multi-controlled Z is exposed through the [`DistributedMcz`] trait
//! with three implementations:
//!
//! | Strategy | Grouping | Ebits per round |
//! |----------|----------|-----------------|
//! | [`LocalMcz`] | one node | 0 |
//! | [`StarMcz`] | exactly four qubits, one party each (3 controls + 1 target) | 3 |
//! | [`HubMcz`] | any grouping of two or more nodes | one per node |

mod cnot;
mod hub;
mod local;
mod star;

use serde::{Deserialize, Serialize};

use qlink_hal::AmplitudeEngine;

use crate::error::DistResult;
use crate::fabric::EbitFabric;
use crate::partition::PartitionPlan;
use crate::register::Register;

pub use cnot::{CorrectionRecord, remote_cnot, remote_cnot_pairs};
pub use hub::HubMcz;
pub use local::LocalMcz;
pub use star::StarMcz;

/// Outcome of one multi-controlled-Z round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    /// Strategy that ran the round.
    pub strategy: String,
    /// Ebits consumed.
    pub ebits: usize,
    /// Measurement outcomes of the node-side ebit halves.
    pub local_outcomes: Vec<bool>,
    /// Measurement outcomes of the router-side ebit halves.
    pub router_outcomes: Vec<bool>,
    /// Classically controlled corrections actually applied.
    pub corrections: usize,
}

/// A multi-controlled Z over the whole register, realised across its nodes.
///
/// The gate flips the phase of the all-ones state of the flattened register
/// and leaves every other basis state untouched.
pub trait DistributedMcz {
    /// Name of this strategy.
    fn name(&self) -> &'static str;

    /// Check that this strategy can realise a grouping shaped like `plan`.
    fn check(&self, plan: &PartitionPlan) -> DistResult<()>;

    /// Ebits one round holds live at once on a grouping shaped like `plan`.
    fn ebits_per_round(&self, plan: &PartitionPlan) -> usize;

    /// Apply the gate to `register`, preparing and releasing ebits through `fabric`.
    fn apply(
        &self,
        engine: &mut dyn AmplitudeEngine,
        fabric: &mut EbitFabric,
        register: &Register,
    ) -> DistResult<RoundReport>;
}

/// Which multi-controlled-Z strategy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// `local` for a single node, `hub` otherwise.
    #[default]
    Auto,
    /// Monolithic gate, no ebits.
    Local,
    /// Legacy star pattern for 3 controls + 1 target.
    Star,
    /// Router hub with one ebit per node.
    Hub,
}

impl StrategyKind {
    /// Resolve to a concrete strategy for `plan`, checking it is supported.
    pub fn select(self, plan: &PartitionPlan) -> DistResult<Box<dyn DistributedMcz>> {
        let strategy: Box<dyn DistributedMcz> = match self {
            StrategyKind::Auto if plan.is_single_node() => Box::new(LocalMcz),
            StrategyKind::Auto | StrategyKind::Hub => Box::new(HubMcz),
            StrategyKind::Local => Box::new(LocalMcz),
            StrategyKind::Star => Box::new(StarMcz),
        };
        strategy.check(plan)?;
        Ok(strategy)
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(StrategyKind::Auto),
            "local" => Ok(StrategyKind::Local),
            "star" => Ok(StrategyKind::Star),
            "hub" => Ok(StrategyKind::Hub),
            other => Err(format!(
                "unknown strategy '{other}' (expected auto, local, star, hub)"
            )),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StrategyKind::Auto => "auto",
            StrategyKind::Local => "local",
            StrategyKind::Star => "star",
            StrategyKind::Hub => "hub",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DistError;
    use crate::partition::plan;

    #[test]
    fn test_auto_selection_by_node_count() {
        let one = plan(4, 4, 1).unwrap();
        let two = plan(4, 2, 2).unwrap();
        assert_eq!(StrategyKind::Auto.select(&one).unwrap().name(), "local");
        assert_eq!(StrategyKind::Auto.select(&two).unwrap().name(), "hub");
    }

    #[test]
    fn test_ebits_per_round_by_strategy() {
        let block = plan(4, 4, 1).unwrap();
        let three = plan(9, 3, 3).unwrap();
        assert_eq!(LocalMcz.ebits_per_round(&three), 0);
        assert_eq!(HubMcz.ebits_per_round(&three), 3);
        assert_eq!(HubMcz.ebits_per_round(&block), 1);
        assert_eq!(StarMcz.ebits_per_round(&block), 3);
    }

    #[test]
    fn test_star_needs_three_controls_and_a_target() {
        let block = plan(4, 4, 1).unwrap();
        assert_eq!(StrategyKind::Star.select(&block).unwrap().name(), "star");
        let five = plan(5, 5, 1).unwrap();
        assert!(matches!(
            StrategyKind::Star.select(&five),
            Err(DistError::UnsupportedGrouping {
                strategy: "star",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("HUB".parse::<StrategyKind>(), Ok(StrategyKind::Hub));
        assert!("ring".parse::<StrategyKind>().is_err());
        assert_eq!(StrategyKind::Star.to_string(), "star");
    }
}
