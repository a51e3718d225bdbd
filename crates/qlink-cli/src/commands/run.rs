//! Run command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qlink_adapter_sim::SimulatorEngine;
use qlink_dist::{Driver, StrategyKind};

use super::common::{ConfigLayer, print_report, resolve_config};

/// Arguments of `qlink run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Target bitstring, qubit 0 first (e.g. 10110010)
    #[arg(short, long, env = "QLINK_TARGET")]
    pub target: Option<String>,

    /// Qubits per node [default: 5]
    #[arg(short, long, env = "QLINK_NODE_CAPACITY")]
    pub capacity: Option<usize>,

    /// Maximum number of nodes [default: 5]
    #[arg(short, long, env = "QLINK_MAX_NODES")]
    pub max_nodes: Option<usize>,

    /// Run a single Grover layer instead of the optimal count
    #[arg(long)]
    pub single_layer: bool,

    /// Number of shots [default: 1]
    #[arg(short, long, env = "QLINK_SHOTS")]
    pub shots: Option<u32>,

    /// Seed for reproducible measurements
    #[arg(long, env = "QLINK_SEED")]
    pub seed: Option<u64>,

    /// Remote multi-controlled-Z strategy (auto, local, star, hub)
    #[arg(long, env = "QLINK_STRATEGY")]
    pub strategy: Option<StrategyKind>,

    /// Ceiling on concurrently simulated qubits [default: 20]
    #[arg(long, env = "QLINK_MAX_SIM_QUBITS")]
    pub max_sim_qubits: Option<usize>,

    /// Config file (YAML or JSON); defaults to ~/.qlink/config.yaml if present
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

impl RunArgs {
    /// The settings given on the command line.
    fn layer(&self, verbosity: u8) -> ConfigLayer {
        ConfigLayer {
            target: self.target.clone(),
            node_capacity: self.capacity,
            max_nodes: self.max_nodes,
            single_layer: self.single_layer.then_some(true),
            verbosity: (verbosity > 0).then_some(verbosity),
            max_sim_qubits: self.max_sim_qubits,
            shots: self.shots,
            seed: self.seed,
            strategy: self.strategy,
        }
    }
}

/// Execute the run command.
pub fn execute(args: &RunArgs, verbosity: u8) -> Result<()> {
    let json = match args.format.to_lowercase().as_str() {
        "table" => false,
        "json" => true,
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    };

    let config = resolve_config(args.config.as_deref(), args.layer(verbosity))?;
    let driver = Driver::new(config.clone()).context("Cannot plan the run")?;

    if !json {
        println!(
            "{} Searching for {} on {} node(s) {:?}",
            style("→").cyan().bold(),
            style(&config.target).green(),
            driver.plan().node_count(),
            driver.plan().sizes()
        );
        println!(
            "  {} layers, {} strategy, {} shot(s), {} concurrent qubits",
            driver.layers(),
            style(driver.strategy_name()).yellow(),
            config.shots,
            driver.required_qubits()
        );
    }

    let mut engine = SimulatorEngine::with_max_qubits(config.max_sim_qubits);
    if let Some(seed) = config.seed {
        engine = engine.with_seed(seed);
    }

    let total_layers = u64::from(config.shots) * driver.layers() as u64;
    let progress = if json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total_layers)
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} layers {msg}")?
            .progress_chars("=> "),
    );

    let report = driver
        .run_with_progress(&mut engine, |p| {
            progress.set_message(format!("shot {}", p.shot + 1));
            progress.inc(1);
        })
        .context("Search failed")?;
    progress.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}
