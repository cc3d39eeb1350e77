use soroban_sdk::{contracttype, Address, Env, Vec, U256};

use crate::constants::{TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::errors::Error;

#[contracttype]
pub enum DataKey {
    Owner,
    Controller,
    Oracle,
    ThresholdRatio,          // u128 scaled 1e18
    BlpPools,                // Vec<Address>
    BlpPoolPos(Address),     // u32 position in BlpPools
    BlpUnderlying(Address),  // LP token staked in the pool
    ValidSupplies,           // Vec<Address>
    ValidSupplyPos(Address), // u32 position in ValidSupplies
    LastRefresh(Address),    // EligibilitySnapshot
}

/// Valuation captured by the most recent `refresh` of an account.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EligibilitySnapshot {
    pub eligible: bool,
    pub valid: bool,
    pub blp_value: U256,
    pub supply_value: U256,
    pub timestamp: u64,
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

pub fn require_owner(env: &Env) -> Result<Address, Error> {
    let owner = read_owner(env)?;
    owner.require_auth();
    Ok(owner)
}

pub fn read_owner(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)
}

pub fn read_address(env: &Env, key: &DataKey) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(key)
        .ok_or(Error::NotInitialized)
}

pub fn read_threshold(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::ThresholdRatio)
        .unwrap_or(0)
}

pub fn read_list(env: &Env, key: &DataKey) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(key)
        .unwrap_or(Vec::new(env))
}

pub fn read_underlying(env: &Env, pool: &Address) -> Option<Address> {
    let key = DataKey::BlpUnderlying(pool.clone());
    let underlying = env.storage().persistent().get(&key);
    if underlying.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    underlying
}

pub fn write_snapshot(env: &Env, account: &Address, snapshot: &EligibilitySnapshot) {
    let key = DataKey::LastRefresh(account.clone());
    env.storage().persistent().set(&key, snapshot);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn read_snapshot(env: &Env, account: &Address) -> Option<EligibilitySnapshot> {
    env.storage()
        .persistent()
        .get(&DataKey::LastRefresh(account.clone()))
}

// Ordered address set: a Vec for iteration plus a position entry per member,
// removal swaps the last element into the vacated slot.

pub fn set_contains(env: &Env, pos_key: &DataKey) -> bool {
    env.storage().persistent().has(pos_key)
}

pub fn set_insert(env: &Env, list_key: &DataKey, pos_key: DataKey, item: &Address) -> bool {
    if set_contains(env, &pos_key) {
        return false;
    }
    let mut list = read_list(env, list_key);
    list.push_back(item.clone());
    let persistent = env.storage().persistent();
    persistent.set(&pos_key, &(list.len() - 1));
    persistent.extend_ttl(&pos_key, TTL_THRESHOLD, TTL_EXTEND_TO);
    persistent.set(list_key, &list);
    persistent.extend_ttl(list_key, TTL_THRESHOLD, TTL_EXTEND_TO);
    true
}

pub fn set_remove<F>(env: &Env, list_key: &DataKey, pos_key_of: F, item: &Address) -> bool
where
    F: Fn(Address) -> DataKey,
{
    let persistent = env.storage().persistent();
    let pos_key = pos_key_of(item.clone());
    let Some(pos) = persistent.get::<_, u32>(&pos_key) else {
        return false;
    };
    let mut list = read_list(env, list_key);
    let last_pos = list.len() - 1;
    if pos != last_pos {
        if let Some(last) = list.get(last_pos) {
            list.set(pos, last.clone());
            persistent.set(&pos_key_of(last), &pos);
        }
    }
    list.pop_back();
    persistent.remove(&pos_key);
    persistent.set(list_key, &list);
    persistent.extend_ttl(list_key, TTL_THRESHOLD, TTL_EXTEND_TO);
    true
}
