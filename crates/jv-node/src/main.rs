//! `jv-node [config.json]`
//!
//! Deploys the genesis accounts, replays a scenario (from `JV_SCENARIO`,
//! the config file, or the built-in demo) and prints the step reports and
//! final state as JSON.

use anyhow::{Context, Result};
use jv_node::{JettonNode, NodeConfig, Scenario, StepReport};
use jv_telemetry::{init_telemetry, TelemetryConfig};
use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

#[derive(Serialize)]
struct Report {
    version: &'static str,
    steps: Vec<StepReport>,
    snapshot: jv_node::Snapshot,
}

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_telemetry(&telemetry).context("Failed to initialize telemetry")?;

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let mut config = NodeConfig::load(config_path.as_deref())?;
    config.apply_env()?;

    info!("===========================================");
    info!("  {} v{}", telemetry.service_name, jv_node::VERSION);
    info!("===========================================");

    let mut node = JettonNode::genesis(&config).context("Genesis failed")?;

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut events = node.bus().subscribe();
    let subscriber = tokio::spawn(async move {
        loop {
            tokio::select! {
                received = events.recv() => match received {
                    Ok(event) => {
                        jv_telemetry::record_event();
                        debug!(topic = event.topic(), lt = event.lt(), "Runtime event");
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Event subscriber lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                _ = shutdown_rx.changed() => {
                    // Drain whatever was published before shutdown.
                    while let Ok(event) = events.try_recv() {
                        jv_telemetry::record_event();
                        debug!(topic = event.topic(), lt = event.lt(), "Runtime event");
                    }
                    break;
                }
            }
        }
    });

    let scenario = match &config.scenario_path {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        None => {
            info!("No scenario configured, running the demo");
            Scenario::demo()
        }
    };

    let mut steps = Vec::with_capacity(scenario.steps.len());
    for step in &scenario.steps {
        steps.push(node.apply(step)?);
    }
    let failed = steps.iter().filter(|s| !s.success).count();
    info!(steps = steps.len(), failed, "Scenario complete");

    if let Err(err) = node.runtime().check_value_conservation() {
        warn!(error = %err, "Value conservation check failed");
    }

    let report = Report {
        version: jv_node::VERSION,
        steps,
        snapshot: node.snapshot()?,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    let _ = shutdown_tx.send(true);
    drop(node);
    subscriber.await.context("Event subscriber panicked")?;

    match jv_telemetry::encode_metrics() {
        Ok(text) => debug!(metrics = %text, "Final metrics"),
        Err(err) => warn!(error = %err, "Failed to encode metrics"),
    }
    Ok(())
}
