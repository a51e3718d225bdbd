//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Distributed Grover search over entanglement-linked nodes",
        style("qlink").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qlink-ir           Qubit handles, gates, bitstrings");
    println!("  qlink-hal          Amplitude engine abstraction");
    println!("  qlink-adapter-sim  Statevector engine");
    println!("  qlink-dist         Partitioning, remote gates, Grover driver");
    println!("  qlink-cli          Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
