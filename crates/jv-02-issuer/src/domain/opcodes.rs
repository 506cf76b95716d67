//! # Operation Selectors
//!
//! CRC-32 (IEEE) of `op::<name>`. Selectors shared with the Holder are
//! re-exported from there.

pub use jv_01_holder::domain::opcodes::{
    BURN_NOTIFICATION, EXCESSES, INTERNAL_TRANSFER, WITHDRAW_BURN, WITHDRAW_BURNED,
};

pub const MINT: u32 = 0xecad_15c4;
pub const PROVIDE_WALLET_ADDRESS: u32 = 0xe450_e86a;
pub const TAKE_WALLET_ADDRESS: u32 = 0x3331_a011;
pub const CHANGE_ADMIN: u32 = 0xb680_1836;
pub const CHANGE_CONTENT: u32 = 0x6361_a5c9;
pub const SET_PRICE: u32 = 0x0f99_0365;
/// Sets the backing token address.
pub const SET_STOKEN: u32 = 0x6773_266c;
pub const SYNC_JETTON: u32 = 0x9d81_8551;
pub const DEPOSIT: u32 = 0xf947_1134;
pub const WITHDRAW: u32 = 0xcb03_bfaf;
pub const RESCUE: u32 = 0x6068_776f;
pub const SET_BLACKLISTED: u32 = 0xd266_96dd;
/// Notification to the backing token that shares were redeemed.
pub const WITHDRAW_RELEASE: u32 = 0x570e_836d;

/// True for selectors gated on the admin address.
#[must_use]
pub fn is_admin_op(selector: u32) -> bool {
    matches!(
        selector,
        MINT | CHANGE_ADMIN
            | CHANGE_CONTENT
            | SET_PRICE
            | SET_BLACKLISTED
            | SET_STOKEN
            | SYNC_JETTON
            | DEPOSIT
            | WITHDRAW
            | RESCUE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(name: &str) -> u32 {
        crc32fast::hash(format!("op::{name}").as_bytes())
    }

    #[test]
    fn test_selectors_match_crc32() {
        for (value, name) in [
            (MINT, "mint"),
            (PROVIDE_WALLET_ADDRESS, "provide_wallet_address"),
            (TAKE_WALLET_ADDRESS, "take_wallet_address"),
            (CHANGE_ADMIN, "change_admin"),
            (CHANGE_CONTENT, "change_content"),
            (SET_PRICE, "set_price"),
            (SET_STOKEN, "set_stoken"),
            (SYNC_JETTON, "sync_jetton"),
            (DEPOSIT, "deposit"),
            (WITHDRAW, "withdraw"),
            (RESCUE, "rescue"),
            (SET_BLACKLISTED, "set_blacklisted"),
            (WITHDRAW_RELEASE, "withdraw_release"),
        ] {
            assert_eq!(value, selector(name), "op::{name}");
        }
    }

    #[test]
    fn test_public_selectors_are_not_admin() {
        for public in [
            BURN_NOTIFICATION,
            WITHDRAW_BURNED,
            PROVIDE_WALLET_ADDRESS,
            EXCESSES,
        ] {
            assert!(!is_admin_op(public));
        }
        assert!(is_admin_op(MINT));
        assert!(is_admin_op(WITHDRAW));
    }
}
