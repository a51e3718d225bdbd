//! Partition planning.
//!
//! Splits a register of `total_qubits` across as few nodes as possible. Every
//! node but the last is filled to capacity; the last node takes the
//! remainder. The router that joins the nodes needs one communication line
//! per node, so the node count is also bounded by the per-node capacity.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DistError, DistResult};

/// Per-node qubit counts for one run. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionPlan {
    sizes: Vec<usize>,
    capacity: usize,
}

impl PartitionPlan {
    /// Qubit count of each node, in register order.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.sizes.len()
    }

    /// Capacity the plan was computed for.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total data qubits across all nodes.
    pub fn total_qubits(&self) -> usize {
        self.sizes.iter().sum()
    }

    /// True when the whole register lives on one node.
    pub fn is_single_node(&self) -> bool {
        self.sizes.len() == 1
    }

    /// Ebits one hub round consumes: one per node, none for a single node.
    pub fn ebits_per_round(&self) -> usize {
        if self.is_single_node() {
            0
        } else {
            self.node_count()
        }
    }

    /// Data qubits plus both halves of one ebit per node.
    pub fn concurrent_qubits(&self) -> usize {
        self.total_qubits() + 2 * self.node_count()
    }

    /// Index range of each node inside the flattened register.
    pub fn ranges(&self) -> Vec<Range<usize>> {
        let mut start = 0;
        self.sizes
            .iter()
            .map(|size| {
                let range = start..start + size;
                start += size;
                range
            })
            .collect()
    }
}

/// Compute the greedy partition of `total_qubits` over nodes of
/// `capacity_per_node`, using at most `max_nodes` nodes.
///
/// # Errors
///
/// - [`DistError::InvalidConfig`] if `total_qubits` is zero.
/// - [`DistError::CapacityExceeded`] if `max_nodes * capacity_per_node < total_qubits`.
/// - [`DistError::RouterTooLarge`] if the required node count exceeds `capacity_per_node`.
///
/// # Example
///
/// ```rust
/// use qlink_dist::partition::plan;
///
/// let p = plan(8, 5, 5).unwrap();
/// assert_eq!(p.sizes(), &[5, 3]);
/// ```
pub fn plan(
    total_qubits: usize,
    capacity_per_node: usize,
    max_nodes: usize,
) -> DistResult<PartitionPlan> {
    if total_qubits == 0 {
        return Err(DistError::InvalidConfig(
            "register must hold at least one qubit".into(),
        ));
    }
    if max_nodes.saturating_mul(capacity_per_node) < total_qubits {
        return Err(DistError::CapacityExceeded {
            total_qubits,
            capacity: capacity_per_node,
            max_nodes,
        });
    }

    let node_count = total_qubits.div_ceil(capacity_per_node);
    if node_count > capacity_per_node {
        return Err(DistError::RouterTooLarge {
            node_count,
            capacity: capacity_per_node,
        });
    }

    let mut sizes = vec![capacity_per_node; node_count - 1];
    sizes.push(total_qubits - capacity_per_node * (node_count - 1));

    debug!(
        total_qubits,
        capacity_per_node, max_nodes, ?sizes, "computed partition plan"
    );

    Ok(PartitionPlan {
        sizes,
        capacity: capacity_per_node,
    })
}
