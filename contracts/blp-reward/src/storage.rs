use soroban_sdk::{contracttype, Address, Env, U256};

use crate::errors::Error;

pub(crate) const TTL_THRESHOLD: u32 = 100_000;
pub(crate) const TTL_EXTEND_TO: u32 = 200_000;

#[contracttype]
pub enum DataKey {
    Owner,
    StakingPool,
    RewardToken,
    Treasury,
    RewardRate,            // u128 reward units per second
    RewardPerTokenStored,  // U256 scaled by PRECISION
    LastUpdateTime,        // u64
    RewardDistributed,     // u128 cumulative emission
    UserRewardPerTokenPaid(Address),
    Rewards(Address),
}

pub fn ensure_initialized(env: &Env) -> Result<(), Error> {
    if !env.storage().instance().has(&DataKey::StakingPool) {
        return Err(Error::NotInitialized);
    }
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(())
}

pub fn require_owner(env: &Env) -> Result<Address, Error> {
    let owner = read_address(env, &DataKey::Owner)?;
    owner.require_auth();
    Ok(owner)
}

pub fn read_address(env: &Env, key: &DataKey) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(key)
        .ok_or(Error::NotInitialized)
}

pub fn read_u128(env: &Env, key: &DataKey) -> u128 {
    env.storage().instance().get(key).unwrap_or(0)
}

pub fn read_rpt_stored(env: &Env) -> U256 {
    env.storage()
        .instance()
        .get(&DataKey::RewardPerTokenStored)
        .unwrap_or(U256::from_u32(env, 0))
}

pub fn read_last_update(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::LastUpdateTime)
        .unwrap_or(env.ledger().timestamp())
}

pub fn read_user_paid(env: &Env, account: &Address) -> U256 {
    env.storage()
        .persistent()
        .get(&DataKey::UserRewardPerTokenPaid(account.clone()))
        .unwrap_or(U256::from_u32(env, 0))
}

pub fn read_rewards(env: &Env, account: &Address) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::Rewards(account.clone()))
        .unwrap_or(0)
}

pub fn write_account(env: &Env, account: &Address, paid: &U256, rewards: u128) {
    let persistent = env.storage().persistent();
    let paid_key = DataKey::UserRewardPerTokenPaid(account.clone());
    let rewards_key = DataKey::Rewards(account.clone());
    persistent.set(&paid_key, paid);
    persistent.set(&rewards_key, &rewards);
    persistent.extend_ttl(&paid_key, TTL_THRESHOLD, TTL_EXTEND_TO);
    persistent.extend_ttl(&rewards_key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn to_i128(amount: u128) -> i128 {
    if amount > i128::MAX as u128 {
        panic!("amount exceeds i128");
    }
    amount as i128
}
