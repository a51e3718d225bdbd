//! qlink Command-Line Interface
//!
//! Runs distributed Grover search over a register partitioned across
//! simulated nodes.
//!
//! ```text
//!    node 0          node 1          node 2
//!  ┌────────┐      ┌────────┐      ┌────────┐
//!  │ q0..q4 │      │ q5..q9 │      │q10..q11│
//!  └───┬────┘      └───┬────┘      └───┬────┘
//!      e0              e1              e2
//!      ┆               ┆               ┆
//!      r0 ──────────── r1 ──────────── r2
//!                   router
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{plan, run, version};

/// qlink - distributed Grover search over entanglement-linked nodes
#[derive(Parser)]
#[command(name = "qlink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a target bitstring on a partitioned register
    Run(run::RunArgs),

    /// Show how a register would be split across nodes
    Plan {
        /// Number of data qubits
        #[arg(short, long)]
        qubits: usize,

        /// Qubits per node
        #[arg(short, long, default_value = "5")]
        capacity: usize,

        /// Maximum number of nodes
        #[arg(short, long, default_value = "5")]
        max_nodes: usize,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Run(args) => run::execute(&args, cli.verbose),

        Commands::Plan {
            qubits,
            capacity,
            max_nodes,
        } => plan::execute(qubits, capacity, max_nodes),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qlink_dist::StrategyKind;

    #[test]
    fn test_parse_run_minimal() {
        let cli = Cli::try_parse_from(["qlink", "run", "--target", "10110010"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.target.as_deref(), Some("10110010"));
        assert_eq!(args.capacity, None);
        assert!(!args.single_layer);
        assert_eq!(args.format, "table");
    }

    #[test]
    fn test_parse_run_with_all_args() {
        let cli = Cli::try_parse_from([
            "qlink",
            "-vv",
            "run",
            "-t",
            "1011",
            "--capacity",
            "2",
            "--max-nodes",
            "3",
            "--single-layer",
            "--shots",
            "64",
            "--seed",
            "7",
            "--strategy",
            "hub",
            "--max-sim-qubits",
            "16",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.capacity, Some(2));
        assert_eq!(args.max_nodes, Some(3));
        assert!(args.single_layer);
        assert_eq!(args.shots, Some(64));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.strategy, Some(StrategyKind::Hub));
        assert_eq!(args.max_sim_qubits, Some(16));
        assert_eq!(args.format, "json");
    }

    #[test]
    fn test_parse_bad_strategy() {
        let result = Cli::try_parse_from(["qlink", "run", "-t", "1", "--strategy", "ring"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_plan_defaults() {
        let cli = Cli::try_parse_from(["qlink", "plan", "--qubits", "8"]).unwrap();
        match cli.command {
            Commands::Plan {
                qubits,
                capacity,
                max_nodes,
            } => {
                assert_eq!(qubits, 8);
                assert_eq!(capacity, 5);
                assert_eq!(max_nodes, 5);
            }
            _ => panic!("expected plan"),
        }
    }

    #[test]
    fn test_no_subcommand() {
        assert!(Cli::try_parse_from(["qlink"]).is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["qlink", "version", "-vvv"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }
}
