//! Index arithmetic shared by both sides of every market.
//!
//! A market side carries a monotonically increasing index, the cumulative
//! reward per unit of eligible balance scaled by [`DOUBLE_SCALE`]. Accounts
//! keep the index value at which they were last settled; the difference
//! times their eligible balance is what they earned in between.

use soroban_sdk::{contracttype, Env, U256};

use crate::constants::{DOUBLE_SCALE, EXP_SCALE, INITIAL_INDEX};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Supply,
    Borrow,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionState {
    pub index: U256,
    pub timestamp: u64,
}

impl DistributionState {
    pub fn initial(env: &Env, timestamp: u64) -> Self {
        DistributionState {
            index: U256::from_u128(env, INITIAL_INDEX),
            timestamp,
        }
    }
}

/// Move `state` forward to `now`.
///
/// ```text
/// index += speed × Δt × DOUBLE_SCALE / eligible_total
/// ```
///
/// The timestamp always advances. The index only moves when time has
/// passed, the speed is non-zero and there is eligible balance to spread
/// the emission over, so a window with no eligible capital is never
/// rewarded retroactively.
pub fn advance(
    env: &Env,
    state: &DistributionState,
    speed: u128,
    eligible_total: u128,
    now: u64,
) -> DistributionState {
    let elapsed = now.saturating_sub(state.timestamp);
    let timestamp = if now > state.timestamp { now } else { state.timestamp };
    if elapsed == 0 || speed == 0 || eligible_total == 0 {
        return DistributionState {
            index: state.index.clone(),
            timestamp,
        };
    }
    let delta = U256::from_u128(env, speed)
        .mul(&U256::from_u128(env, elapsed as u128))
        .mul(&U256::from_u128(env, DOUBLE_SCALE))
        .div(&U256::from_u128(env, eligible_total));
    DistributionState {
        index: state.index.add(&delta),
        timestamp,
    }
}

/// Reward earned by `balance` between `snapshot` and `index`:
///
/// ```text
/// balance × (index − snapshot) / DOUBLE_SCALE
/// ```
pub fn accrued(env: &Env, balance: u128, index: &U256, snapshot: &U256) -> u128 {
    if balance == 0 || index <= snapshot {
        return 0;
    }
    let reward = U256::from_u128(env, balance)
        .mul(&index.sub(snapshot))
        .div(&U256::from_u128(env, DOUBLE_SCALE));
    match reward.to_u128() {
        Some(reward) => reward,
        None => panic!("accrued reward exceeds u128"),
    }
}

/// Splits `reward` into `(account_share, hunter_share)`, the hunter taking
/// `reward × ratio / 1e18` out of the account's payout.
pub fn split_bounty(env: &Env, reward: u128, ratio: u128) -> (u128, u128) {
    let bounty = U256::from_u128(env, reward)
        .mul(&U256::from_u128(env, ratio))
        .div(&U256::from_u128(env, EXP_SCALE))
        .to_u128()
        .unwrap_or(reward);
    let bounty = if bounty > reward { reward } else { bounty };
    (reward - bounty, bounty)
}
