use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::constants::{TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::errors::Error;

#[contracttype]
pub enum DataKey {
    Owner,
    Controller,
    EligibilityManager,
    Distributors,            // Vec<Address>
    DistributorPos(Address), // u32 position in Distributors
    Markets,                 // Vec<Address> mirror of the controller's markets
    MarketPos(Address),      // u32 position in Markets
    Retired(Address),        // bool, set once a distributor is removed
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

/// Authenticates `caller` and checks it is the lending controller.
pub fn require_controller(env: &Env, caller: &Address) -> Result<(), Error> {
    ensure_initialized(env)?;
    caller.require_auth();
    if *caller != read_address(env, &DataKey::Controller)? {
        return Err(Error::CallerIsNotController);
    }
    Ok(())
}

pub fn read_eligibility_manager(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::EligibilityManager)
}

pub fn read_list(env: &Env, key: &DataKey) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(key)
        .unwrap_or(Vec::new(env))
}

pub fn read_distributors(env: &Env) -> Vec<Address> {
    read_list(env, &DataKey::Distributors)
}

pub fn read_markets(env: &Env) -> Vec<Address> {
    read_list(env, &DataKey::Markets)
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
