use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::errors::Error;

pub(crate) const TTL_THRESHOLD: u32 = 100_000;
pub(crate) const TTL_EXTEND_TO: u32 = 200_000;

#[contracttype]
pub enum DataKey {
    Owner,
    StakingToken,
    TotalSupply,
    Balance(Address),
    RewardDistributors, // Vec<Address>
}

pub fn ensure_initialized(env: &Env) -> Result<Address, Error> {
    let token = env
        .storage()
        .instance()
        .get(&DataKey::StakingToken)
        .ok_or(Error::NotInitialized)?;
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(token)
}

pub fn require_owner(env: &Env) -> Result<Address, Error> {
    let owner: Address = env
        .storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)?;
    owner.require_auth();
    Ok(owner)
}

pub fn read_balance(env: &Env, account: &Address) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(account.clone()))
        .unwrap_or(0)
}

pub fn write_balance(env: &Env, account: &Address, amount: u128) {
    let key = DataKey::Balance(account.clone());
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn read_total(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn write_total(env: &Env, total: u128) {
    env.storage().instance().set(&DataKey::TotalSupply, &total);
}

pub fn read_distributors(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::RewardDistributors)
        .unwrap_or(Vec::new(env))
}

pub fn write_distributors(env: &Env, distributors: &Vec<Address>) {
    env.storage()
        .instance()
        .set(&DataKey::RewardDistributors, distributors);
}

pub fn to_i128(amount: u128) -> i128 {
    if amount > i128::MAX as u128 {
        panic!("amount exceeds i128");
    }
    amount as i128
}
