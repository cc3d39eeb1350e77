pub const EXP_SCALE: u128 = 1_000_000_000_000_000_000u128; // 1e18
pub const DOUBLE_SCALE: u128 = 1_000_000_000_000_000_000_000_000_000_000_000_000u128; // 1e36
pub const INITIAL_INDEX: u128 = DOUBLE_SCALE;
pub const MAX_BOUNTY_RATIO: u128 = EXP_SCALE / 10; // 10%

pub(crate) const TTL_THRESHOLD: u32 = 100_000;
pub(crate) const TTL_EXTEND_TO: u32 = 200_000;
