//! Prometheus metrics for the node.
//!
//! Account crates register their own counters in the default registry when
//! built with their `metrics` feature; [`encode_metrics`] renders all of
//! them together with the node metrics below.
//!
//! All metrics follow the naming convention: `jv_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, register_histogram, register_int_counter, register_int_counter_vec,
    Encoder, Histogram, IntCounter, IntCounterVec, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Scenario steps executed
    pub static ref SCENARIO_STEPS: IntCounterVec = register_int_counter_vec!(
        "jv_node_scenario_steps_total",
        "Scenario steps executed by the node",
        &["action", "outcome"]
    )
    .expect("Failed to create SCENARIO_STEPS metric");

    /// Runtime events seen by the node's subscriber
    pub static ref EVENTS_OBSERVED: IntCounter = register_int_counter!(
        "jv_node_events_observed_total",
        "Runtime events received over the broadcast bus"
    )
    .expect("Failed to create EVENTS_OBSERVED metric");

    /// Time to run one scenario step to idle
    pub static ref STEP_DURATION: Histogram = register_histogram!(
        "jv_node_step_duration_seconds",
        "Time spent driving one scenario step until the queue drains",
        exponential_buckets(0.000_1, 2.0, 14).unwrap_or_default()
    )
    .expect("Failed to create STEP_DURATION metric");
}

/// Record a finished scenario step
pub fn record_step(action: &str, success: bool) {
    let outcome = if success { "ok" } else { "failed" };
    SCENARIO_STEPS.with_label_values(&[action, outcome]).inc();
}

/// Record one event from the bus
pub fn record_event() {
    EVENTS_OBSERVED.inc();
}

/// Encode every registered metric as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsEncode(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsEncode(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
