//! # Runtime Metrics
//!
//! Prometheus metrics for message delivery.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! shared-runtime = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `jv_transactions_total` - Counter of executed transactions
//! - `jv_transactions_failed_total` - Counter of failed transactions (by exit code)
//! - `jv_messages_bounced_total` - Counter of bounced messages
//! - `jv_accounts_deployed_total` - Counter of deployed accounts
//! - `jv_queue_depth` - Gauge of queued messages after the last drain

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter,
    IntCounterVec, IntGauge,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total transactions executed
    pub static ref TRANSACTIONS: IntCounter = register_int_counter!(
        "jv_transactions_total",
        "Total number of transactions executed"
    )
    .expect("Failed to create TRANSACTIONS metric");

    /// Failed transactions, labeled by exit code
    pub static ref TRANSACTIONS_FAILED: IntCounterVec = register_int_counter_vec!(
        "jv_transactions_failed_total",
        "Total number of failed transactions",
        &["exit_code"]
    )
    .expect("Failed to create TRANSACTIONS_FAILED metric");

    /// Total bounced messages
    pub static ref MESSAGES_BOUNCED: IntCounter = register_int_counter!(
        "jv_messages_bounced_total",
        "Total number of bounced messages"
    )
    .expect("Failed to create MESSAGES_BOUNCED metric");

    /// Total deployed accounts
    pub static ref ACCOUNTS_DEPLOYED: IntCounter = register_int_counter!(
        "jv_accounts_deployed_total",
        "Total number of deployed accounts"
    )
    .expect("Failed to create ACCOUNTS_DEPLOYED metric");

    /// Queue depth after the last drain
    pub static ref QUEUE_DEPTH: IntGauge = register_int_gauge!(
        "jv_queue_depth",
        "Messages still queued after the last drain"
    )
    .expect("Failed to create QUEUE_DEPTH metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a finished transaction
#[cfg(feature = "metrics")]
pub fn record_transaction(success: bool, exit_code: i32) {
    TRANSACTIONS.inc();
    if !success {
        TRANSACTIONS_FAILED
            .with_label_values(&[&exit_code.to_string()])
            .inc();
    }
}

/// Record a bounce
#[cfg(feature = "metrics")]
pub fn record_bounce() {
    MESSAGES_BOUNCED.inc();
}

/// Record a deployment
#[cfg(feature = "metrics")]
pub fn record_deploy() {
    ACCOUNTS_DEPLOYED.inc();
}

/// Update queue depth gauge
#[cfg(feature = "metrics")]
pub fn set_queue_depth(depth: usize) {
    QUEUE_DEPTH.set(depth as i64);
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_transaction(_success: bool, _exit_code: i32) {}

#[cfg(not(feature = "metrics"))]
pub fn record_bounce() {}

#[cfg(not(feature = "metrics"))]
pub fn record_deploy() {}

#[cfg(not(feature = "metrics"))]
pub fn set_queue_depth(_depth: usize) {}
