//! Shared helpers for CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use serde::Deserialize;
use tracing::debug;

use qlink_dist::{RunConfig, RunReport, StrategyKind};

/// Run settings from one source. `None` means the source does not set it.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub target: Option<String>,
    pub node_capacity: Option<usize>,
    pub max_nodes: Option<usize>,
    pub single_layer: Option<bool>,
    pub verbosity: Option<u8>,
    pub max_sim_qubits: Option<usize>,
    pub shots: Option<u32>,
    pub seed: Option<u64>,
    pub strategy: Option<StrategyKind>,
}

impl ConfigLayer {
    /// Fields set in `upper` win over fields set in `self`.
    pub fn overlay(self, upper: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            target: upper.target.or(self.target),
            node_capacity: upper.node_capacity.or(self.node_capacity),
            max_nodes: upper.max_nodes.or(self.max_nodes),
            single_layer: upper.single_layer.or(self.single_layer),
            verbosity: upper.verbosity.or(self.verbosity),
            max_sim_qubits: upper.max_sim_qubits.or(self.max_sim_qubits),
            shots: upper.shots.or(self.shots),
            seed: upper.seed.or(self.seed),
            strategy: upper.strategy.or(self.strategy),
        }
    }

    /// Fill unset fields with built-in defaults.
    pub fn into_run_config(self) -> Result<RunConfig> {
        let target = self
            .target
            .context("No target bitstring given (use --target or set it in the config file)")?;
        let mut config = RunConfig::from_target_str(&target)
            .with_context(|| format!("Invalid target bitstring: '{target}'"))?;

        if let Some(v) = self.node_capacity {
            config = config.with_node_capacity(v);
        }
        if let Some(v) = self.max_nodes {
            config = config.with_max_nodes(v);
        }
        if let Some(v) = self.single_layer {
            config = config.with_single_layer(v);
        }
        if let Some(v) = self.verbosity {
            config = config.with_verbosity(v);
        }
        if let Some(v) = self.max_sim_qubits {
            config = config.with_max_sim_qubits(v);
        }
        if let Some(v) = self.shots {
            config = config.with_shots(v);
        }
        if let Some(strategy) = self.strategy {
            config = config.with_strategy(strategy);
        }
        config = config.with_seed(self.seed);

        config.validate()?;
        Ok(config)
    }
}

/// Return the default config file path (~/.qlink/config.yaml).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".qlink").join("config.yaml"))
}

/// Load a config layer from a YAML or JSON file.
pub fn load_config_file(path: &Path) -> Result<ConfigLayer> {
    if !path.exists() {
        anyhow::bail!("Config file not found: {}", path.display());
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let layer = match ext.to_lowercase().as_str() {
        "json" => serde_json::from_str(&source)
            .with_context(|| format!("Invalid JSON config: {}", path.display()))?,
        _ => serde_yaml_ng::from_str(&source)
            .with_context(|| format!("Invalid YAML config: {}", path.display()))?,
    };
    debug!(path = %path.display(), "loaded config file");
    Ok(layer)
}

/// Assemble the run configuration: defaults, then the config file, then `cli`.
///
/// An explicit `config_path` must exist; the default path is used only when
/// present.
pub fn resolve_config(config_path: Option<&Path>, cli: ConfigLayer) -> Result<RunConfig> {
    let file = match config_path {
        Some(path) => load_config_file(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => load_config_file(&path)?,
            _ => ConfigLayer::default(),
        },
    };
    file.overlay(cli).into_run_config()
}

/// Print a run report as a histogram table.
pub fn print_report(report: &RunReport) {
    let target = report.target.to_string();

    println!(
        "\n{} Results ({} shots, {} layers, {} strategy):",
        style("✓").green().bold(),
        report.shots,
        report.layers,
        report.strategy
    );

    for (bitstring, count) in report.counts.sorted().into_iter().take(16) {
        let prob = report.counts.frequency(bitstring) * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);
        let marker = if *bitstring == target { "←" } else { "" };

        println!(
            "  {}: {:>6} ({:>5.2}%) {} {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green(),
            style(marker).yellow()
        );
    }

    if report.counts.len() > 16 {
        println!("  ... and {} more outcomes", report.counts.len() - 16);
    }

    println!(
        "\n  Success rate:      {}",
        style(format!("{:.1}%", report.success_rate * 100.0)).yellow()
    );
    println!("  Ebits consumed:    {}", report.ebits_consumed);
    println!("  Peak live qubits:  {}", report.peak_live_qubits);
    println!("  Execution time:    {} ms", style(report.elapsed_ms).yellow());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(target: &str) -> ConfigLayer {
        ConfigLayer {
            target: Some(target.into()),
            ..ConfigLayer::default()
        }
    }

    #[test]
    fn test_overlay_prefers_upper() {
        let file = ConfigLayer {
            node_capacity: Some(3),
            shots: Some(10),
            ..layer("0000")
        };
        let cli = ConfigLayer {
            shots: Some(99),
            ..layer("1111")
        };
        let merged = file.overlay(cli);
        assert_eq!(merged.target.as_deref(), Some("1111"));
        assert_eq!(merged.node_capacity, Some(3));
        assert_eq!(merged.shots, Some(99));
    }

    #[test]
    fn test_defaults_fill_gaps() {
        let config = layer("101").into_run_config().unwrap();
        assert_eq!(config.node_capacity, 5);
        assert_eq!(config.max_nodes, 5);
        assert_eq!(config.max_sim_qubits, 20);
        assert_eq!(config.shots, 1);
        assert_eq!(config.strategy, StrategyKind::Auto);
    }

    #[test]
    fn test_missing_target() {
        let err = ConfigLayer::default().into_run_config().unwrap_err();
        assert!(err.to_string().contains("No target"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(layer("10x1").into_run_config().is_err());
        let zero_shots = ConfigLayer {
            shots: Some(0),
            ..layer("101")
        };
        assert!(zero_shots.into_run_config().is_err());
    }

    #[test]
    fn test_load_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("run.yaml");
        fs::write(&yaml, "target: \"1011\"\nnode_capacity: 2\nstrategy: hub\n").unwrap();
        let loaded = load_config_file(&yaml).unwrap();
        assert_eq!(loaded.target.as_deref(), Some("1011"));
        assert_eq!(loaded.node_capacity, Some(2));
        assert_eq!(loaded.strategy, Some(StrategyKind::Hub));

        let json = dir.path().join("run.json");
        fs::write(&json, r#"{"max_nodes": 4, "seed": 3}"#).unwrap();
        let loaded = load_config_file(&json).unwrap();
        assert_eq!(loaded.max_nodes, Some(4));
        assert_eq!(loaded.seed, Some(3));
    }

    #[test]
    fn test_load_rejects_unknown_keys_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.yaml");
        fs::write(&bad, "capacity: 2\n").unwrap();
        assert!(load_config_file(&bad).is_err());
        assert!(load_config_file(&dir.path().join("absent.yaml")).is_err());
    }

    #[test]
    fn test_resolve_with_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.yaml");
        fs::write(&path, "target: \"0110\"\nnode_capacity: 2\nshots: 8\n").unwrap();

        let cli = ConfigLayer {
            shots: Some(4),
            ..ConfigLayer::default()
        };
        let config = resolve_config(Some(&path), cli).unwrap();
        assert_eq!(config.target.to_string(), "0110");
        assert_eq!(config.node_capacity, 2);
        assert_eq!(config.shots, 4);
    }
}
