use soroban_sdk::{Env, U256};

/// Fixed-point scale of reward-per-token values.
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Advance the global reward-per-token accumulator.
///
/// ```text
/// Δrpt = reward_rate × elapsed × PRECISION / total_staked
/// ```
///
/// Nothing accrues while the pool is empty, so the accumulator is returned
/// unchanged when `total_staked` is zero.
pub fn compute_reward_per_token(
    env: &Env,
    stored: &U256,
    reward_rate: u128,
    elapsed: u64,
    total_staked: u128,
) -> U256 {
    if total_staked == 0 || elapsed == 0 || reward_rate == 0 {
        return stored.clone();
    }
    let delta = U256::from_u128(env, reward_rate)
        .mul(&U256::from_u128(env, elapsed as u128))
        .mul(&U256::from_u128(env, PRECISION))
        .div(&U256::from_u128(env, total_staked));
    stored.add(&delta)
}

/// Rewards owed to a staker since its last snapshot, plus what it already had.
///
/// ```text
/// earned = staked × (current_rpt − user_rpt_paid) / PRECISION + user_earned
/// ```
pub fn earned(
    env: &Env,
    staked: u128,
    current_rpt: &U256,
    user_rpt_paid: &U256,
    user_earned: u128,
) -> u128 {
    if staked == 0 || current_rpt <= user_rpt_paid {
        return user_earned;
    }
    let fresh = U256::from_u128(env, staked)
        .mul(&current_rpt.sub(user_rpt_paid))
        .div(&U256::from_u128(env, PRECISION));
    match fresh.to_u128() {
        Some(fresh) => user_earned.saturating_add(fresh),
        None => panic!("earned reward exceeds u128"),
    }
}
