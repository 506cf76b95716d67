//! # Holder Metrics
//!
//! Enable with the `metrics` feature.
//!
//! - `jv_holder_transfers_total` - Counter of outgoing transfers
//! - `jv_holder_burned_units_total` - Counter of burned token units
//! - `jv_holder_credits_total` - Counter of accepted credits

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, IntCounter};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Outgoing transfers
    pub static ref TRANSFERS: IntCounter = register_int_counter!(
        "jv_holder_transfers_total",
        "Total number of outgoing Holder transfers"
    )
    .expect("Failed to create TRANSFERS metric");

    /// Burned token units
    pub static ref BURNED_UNITS: IntCounter = register_int_counter!(
        "jv_holder_burned_units_total",
        "Total token units burned by Holders"
    )
    .expect("Failed to create BURNED_UNITS metric");

    /// Accepted credits
    pub static ref CREDITS: IntCounter = register_int_counter!(
        "jv_holder_credits_total",
        "Total number of credits accepted by Holders"
    )
    .expect("Failed to create CREDITS metric");
}

/// Record an outgoing transfer
#[cfg(feature = "metrics")]
pub fn record_transfer() {
    TRANSFERS.inc();
}

/// Record a burn
#[cfg(feature = "metrics")]
pub fn record_burn(amount: u128) {
    BURNED_UNITS.inc_by(u64::try_from(amount).unwrap_or(u64::MAX));
}

/// Record a credit
#[cfg(feature = "metrics")]
pub fn record_credit() {
    CREDITS.inc();
}

#[cfg(not(feature = "metrics"))]
pub fn record_transfer() {}

#[cfg(not(feature = "metrics"))]
pub fn record_burn(_amount: u128) {}

#[cfg(not(feature = "metrics"))]
pub fn record_credit() {}
