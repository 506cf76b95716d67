//! # Issuer Metrics
//!
//! Enable with the `metrics` feature.
//!
//! - `jv_issuer_minted_units_total` - Counter of minted token units
//! - `jv_issuer_burned_units_total` - Counter of burned or withdrawn token units
//! - `jv_issuer_unauthorized_total` - Counter of refused admin operations
//! - `jv_issuer_total_supply` - Gauge of the supply after the last change

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_gauge, IntCounter, IntGauge};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Minted token units
    pub static ref MINTED_UNITS: IntCounter = register_int_counter!(
        "jv_issuer_minted_units_total",
        "Total token units minted by the Issuer"
    )
    .expect("Failed to create MINTED_UNITS metric");

    /// Burned token units
    pub static ref BURNED_UNITS: IntCounter = register_int_counter!(
        "jv_issuer_burned_units_total",
        "Total token units removed from supply"
    )
    .expect("Failed to create BURNED_UNITS metric");

    /// Refused admin operations
    pub static ref UNAUTHORIZED: IntCounter = register_int_counter!(
        "jv_issuer_unauthorized_total",
        "Total number of refused admin operations"
    )
    .expect("Failed to create UNAUTHORIZED metric");

    /// Current supply
    pub static ref TOTAL_SUPPLY: IntGauge = register_int_gauge!(
        "jv_issuer_total_supply",
        "Issuer total supply after the last change"
    )
    .expect("Failed to create TOTAL_SUPPLY metric");
}

#[cfg(feature = "metrics")]
fn saturate(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// Record a mint and the resulting supply
#[cfg(feature = "metrics")]
pub fn record_mint(amount: u128, supply: u128) {
    MINTED_UNITS.inc_by(saturate(amount));
    TOTAL_SUPPLY.set(i64::try_from(supply).unwrap_or(i64::MAX));
}

/// Record a burn and the resulting supply
#[cfg(feature = "metrics")]
pub fn record_burn(amount: u128, supply: u128) {
    BURNED_UNITS.inc_by(saturate(amount));
    TOTAL_SUPPLY.set(i64::try_from(supply).unwrap_or(i64::MAX));
}

/// Record a refused admin operation
#[cfg(feature = "metrics")]
pub fn record_unauthorized() {
    UNAUTHORIZED.inc();
}

#[cfg(not(feature = "metrics"))]
pub fn record_mint(_amount: u128, _supply: u128) {}

#[cfg(not(feature = "metrics"))]
pub fn record_burn(_amount: u128, _supply: u128) {}

#[cfg(not(feature = "metrics"))]
pub fn record_unauthorized() {}
