//! Manager operation selectors (CRC-32 of `op::<name>`).

pub const SET_TOKENS: u32 = 0xe29f_d998;
pub const SET_TREASURY: u32 = 0x5ce3_81a0;
pub const DEPOSIT: u32 = 0xf947_1134;
pub const WITHDRAW: u32 = 0xcb03_bfaf;
pub const SET_ASSET: u32 = 0x7551_07fb;
