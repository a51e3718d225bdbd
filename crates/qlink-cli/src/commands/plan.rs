//! Plan command implementation.

use anyhow::{Context, Result};
use console::style;

use qlink_dist::{iteration_count, plan};

/// Execute the plan command.
pub fn execute(qubits: usize, capacity: usize, max_nodes: usize) -> Result<()> {
    let p = plan(qubits, capacity, max_nodes).context("No feasible partition")?;

    println!(
        "{} {} qubits on nodes of capacity {} (at most {})",
        style("→").cyan().bold(),
        style(qubits).green(),
        capacity,
        max_nodes
    );

    for (index, range) in p.ranges().into_iter().enumerate() {
        println!(
            "  node {}: {:>2} qubits  q{}..=q{}",
            style(index).cyan(),
            range.len(),
            range.start,
            range.end - 1
        );
    }

    let layers = iteration_count(qubits, false);
    let per_shot = ebits_per_shot(p.ebits_per_round(), layers)
        .map_or_else(|| "more than usize::MAX".to_string(), |n| n.to_string());
    println!();
    println!("  Ebits per round:    {}", p.ebits_per_round());
    println!("  Ebits per layer:    {}", 2 * p.ebits_per_round());
    println!("  Concurrent qubits:  {}", p.concurrent_qubits());
    println!("  Optimal layers:     {}", style(layers).yellow());
    println!("  Ebits per shot:     {}", style(per_shot).yellow());

    Ok(())
}

/// Ebits one shot consumes: two rounds per layer. `None` on overflow.
fn ebits_per_shot(ebits_per_round: usize, layers: usize) -> Option<usize> {
    ebits_per_round.checked_mul(2)?.checked_mul(layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ebits_per_shot() {
        assert_eq!(ebits_per_shot(2, 12), Some(48));
        assert_eq!(ebits_per_shot(0, usize::MAX), Some(0));
        assert_eq!(ebits_per_shot(12, iteration_count(144, false)), None);
    }
}
