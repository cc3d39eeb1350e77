pub const EXP_SCALE: u128 = 1_000_000_000_000_000_000u128; // 1e18

pub(crate) const TTL_THRESHOLD: u32 = 100_000;
pub(crate) const TTL_EXTEND_TO: u32 = 200_000;
