//! # Jetton Vault Telemetry
//!
//! Structured logging through `tracing-subscriber` and Prometheus metrics
//! for the node binary. Library crates only emit `tracing` events and
//! register their own counters; this crate decides where they go.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jv_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(&TelemetryConfig::from_env())?;
//!     // Logs and metrics are now being collected
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `JV_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directive |
//! | `JV_JSON_LOGS` | `false` | JSON lines output |
//! | `JV_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `JV_SERVICE_NAME` | `jetton-vault` | Service name in the startup line |

#![warn(clippy::all)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_tracing};
pub use metrics::{encode_metrics, record_event, record_step, HistogramTimer, STEP_DURATION};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Failed to encode metrics: {0}")]
    MetricsEncode(String),
}

/// Initialize logging and force-register the node metrics.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    init_tracing(config)?;
    lazy_static::initialize(&metrics::SCENARIO_STEPS);
    lazy_static::initialize(&metrics::EVENTS_OBSERVED);
    lazy_static::initialize(&metrics::STEP_DURATION);
    Ok(())
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
