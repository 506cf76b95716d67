//! # Operation Selectors
//!
//! Every selector is the CRC-32 (IEEE) of `op::<name>`.

/// Owner asks its Holder to move tokens to another owner.
pub const TRANSFER: u32 = 0x3ee9_43f1;
/// Holder-to-Holder (or Issuer-to-Holder) credit.
pub const INTERNAL_TRANSFER: u32 = 0xce30_d1dc;
/// Owner destroys part of its balance.
pub const BURN: u32 = 0xbae7_fba1;
/// Sent to the owner when a credit carries forward value.
pub const TRANSFER_NOTIFICATION: u32 = 0x4fb8_dedc;
/// Refund of unused native value.
pub const EXCESSES: u32 = 0x7d7a_ec1d;
/// Holder tells the Issuer that supply shrank.
pub const BURN_NOTIFICATION: u32 = 0x8948_44ca;
/// Issuer debits shares during a withdraw.
pub const WITHDRAW_BURN: u32 = 0x9559_8b48;
/// Holder confirms a withdraw debit back to the Issuer.
pub const WITHDRAW_BURNED: u32 = 0x5146_22a0;

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(name: &str) -> u32 {
        crc32fast::hash(format!("op::{name}").as_bytes())
    }

    #[test]
    fn test_selectors_match_crc32() {
        assert_eq!(TRANSFER, selector("transfer"));
        assert_eq!(INTERNAL_TRANSFER, selector("internal_transfer"));
        assert_eq!(BURN, selector("burn"));
        assert_eq!(TRANSFER_NOTIFICATION, selector("transfer_notification"));
        assert_eq!(EXCESSES, selector("excesses"));
        assert_eq!(BURN_NOTIFICATION, selector("burn_notification"));
        assert_eq!(WITHDRAW_BURN, selector("withdraw_burn"));
        assert_eq!(WITHDRAW_BURNED, selector("withdraw_burned"));
    }
}
