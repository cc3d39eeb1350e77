use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "StakingPoolClient")]
pub trait StakingPool {
    fn balance_of(env: Env, account: Address) -> u128;
    fn total_supply(env: Env) -> u128;
}
