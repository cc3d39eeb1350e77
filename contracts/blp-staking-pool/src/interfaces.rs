use soroban_sdk::{contractclient, Address, Env};

/// Linear reward distributor settled by the pool before every balance change.
#[contractclient(name = "BlpRewardClient")]
pub trait BlpReward {
    fn update_reward(env: Env, caller: Address, account: Address, balance: u128, total_supply: u128);
}
