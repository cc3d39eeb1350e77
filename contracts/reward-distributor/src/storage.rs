use soroban_sdk::{contracttype, Address, Env, Vec, U256};

use crate::constants::{INITIAL_INDEX, TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::distribution::{DistributionState, Side};
use crate::errors::Error;

#[contracttype]
pub enum DataKey {
    Owner,
    Controller,
    Manager,
    RewardToken,
    Treasury,
    BountyRatio,  // u128 scaled 1e18
    Paused,       // bool
    SpeedMarkets, // Vec<Address> markets that ever had a speed configured
    Speed(Side, Address),
    State(Side, Address),
    AccountIndex(Side, Address, Address), // (side, market, account) -> U256
    Reward(Address),
}

pub fn ensure_initialized(env: &Env) -> Result<(), Error> {
    if !env.storage().instance().has(&DataKey::Owner) {
        return Err(Error::NotInitialized);
    }
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(())
}

pub fn read_address(env: &Env, key: &DataKey) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(key)
        .ok_or(Error::NotInitialized)
}

pub fn require_owner(env: &Env) -> Result<Address, Error> {
    let owner = read_address(env, &DataKey::Owner)?;
    owner.require_auth();
    Ok(owner)
}

/// Authenticates `caller` and checks it is the configured manager.
pub fn require_manager(env: &Env, caller: &Address) -> Result<(), Error> {
    ensure_initialized(env)?;
    caller.require_auth();
    if *caller != read_address(env, &DataKey::Manager)? {
        return Err(Error::CallerIsNotRewardManager);
    }
    Ok(())
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(true)
}

pub fn read_bounty_ratio(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::BountyRatio)
        .unwrap_or(0)
}

pub fn read_speed_markets(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::SpeedMarkets)
        .unwrap_or(Vec::new(env))
}

pub fn remember_speed_market(env: &Env, market: &Address) {
    let mut markets = read_speed_markets(env);
    if !markets.contains(market) {
        markets.push_back(market.clone());
        env.storage()
            .persistent()
            .set(&DataKey::SpeedMarkets, &markets);
    }
    env.storage()
        .persistent()
        .extend_ttl(&DataKey::SpeedMarkets, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn read_speed(env: &Env, side: Side, market: &Address) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::Speed(side, market.clone()))
        .unwrap_or(0)
}

pub fn write_speed(env: &Env, side: Side, market: &Address, speed: u128) {
    let key = DataKey::Speed(side, market.clone());
    env.storage().persistent().set(&key, &speed);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Untouched markets start at the initial index as of now.
pub fn read_state(env: &Env, side: Side, market: &Address) -> DistributionState {
    env.storage()
        .persistent()
        .get(&DataKey::State(side, market.clone()))
        .unwrap_or(DistributionState::initial(env, env.ledger().timestamp()))
}

pub fn write_state(env: &Env, side: Side, market: &Address, state: &DistributionState) {
    let key = DataKey::State(side, market.clone());
    env.storage().persistent().set(&key, state);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Accounts never settled on this side read as the initial index, so a
/// balance that predates this distributor earns nothing retroactively.
pub fn read_account_index(env: &Env, side: Side, market: &Address, account: &Address) -> U256 {
    env.storage()
        .persistent()
        .get(&DataKey::AccountIndex(side, market.clone(), account.clone()))
        .unwrap_or(U256::from_u128(env, INITIAL_INDEX))
}

pub fn write_account_index(env: &Env, side: Side, market: &Address, account: &Address, index: &U256) {
    let key = DataKey::AccountIndex(side, market.clone(), account.clone());
    env.storage().persistent().set(&key, index);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn read_reward(env: &Env, account: &Address) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::Reward(account.clone()))
        .unwrap_or(0)
}

pub fn write_reward(env: &Env, account: &Address, amount: u128) {
    let key = DataKey::Reward(account.clone());
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn to_i128(amount: u128) -> i128 {
    if amount > i128::MAX as u128 {
        panic!("amount exceeds i128");
    }
    amount as i128
}
