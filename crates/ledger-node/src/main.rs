//! `ledger-node <scenario.json>`
//!
//! Runs a scenario and writes one JSON line per step to stdout, followed by
//! a line holding the final account snapshot. Logs go to stderr.

use std::io::{self, Write};
use std::{env, fs};

use anyhow::{Context, Result};
use ledger_node::{NodeConfig, Scenario, ScenarioRunner};
use ledger_telemetry::{init_logging, TelemetryConfig};
use tracing::info;

fn main() -> Result<()> {
    init_logging(&TelemetryConfig::from_env()).context("failed to initialize logging")?;

    let path = env::args()
        .nth(1)
        .context("usage: ledger-node <scenario.json>")?;

    let config = NodeConfig::from_env();
    config.validate().context("invalid node configuration")?;

    let text =
        fs::read_to_string(&path).with_context(|| format!("failed to read scenario {path}"))?;
    let scenario: Scenario =
        serde_json::from_str(&text).with_context(|| format!("failed to parse scenario {path}"))?;

    let runner = ScenarioRunner::new(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    runner.run(&scenario, |report| {
        serde_json::to_writer(&mut out, report)?;
        writeln!(out)
    })?;

    let snapshot = runner.ledger().snapshot();
    serde_json::to_writer(&mut out, &snapshot).context("failed to write snapshot")?;
    writeln!(out)?;

    let stats = runner.ledger().stats();
    info!(
        processed = stats.processed,
        succeeded = stats.succeeded,
        failed = stats.failed,
        accounts = snapshot.len(),
        "scenario complete"
    );
    Ok(())
}
