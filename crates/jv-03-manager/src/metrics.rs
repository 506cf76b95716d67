//! # Manager Metrics
//!
//! Enable with the `metrics` feature.
//!
//! - `jv_manager_signature_failures_total` - Counter of rejected signatures
//! - `jv_manager_updates_total` - Counter of accepted signed requests

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, IntCounter};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Rejected signatures
    pub static ref SIGNATURE_FAILURES: IntCounter = register_int_counter!(
        "jv_manager_signature_failures_total",
        "Total number of Manager messages with a rejected signature"
    )
    .expect("Failed to create SIGNATURE_FAILURES metric");

    /// Accepted requests
    pub static ref UPDATES: IntCounter = register_int_counter!(
        "jv_manager_updates_total",
        "Total number of accepted signed Manager requests"
    )
    .expect("Failed to create UPDATES metric");
}

/// Record a rejected signature
#[cfg(feature = "metrics")]
pub fn record_signature_failure() {
    SIGNATURE_FAILURES.inc();
}

/// Record an accepted request
#[cfg(feature = "metrics")]
pub fn record_update() {
    UPDATES.inc();
}

#[cfg(not(feature = "metrics"))]
pub fn record_signature_failure() {}

#[cfg(not(feature = "metrics"))]
pub fn record_update() {}
