use soroban_sdk::{contractclient, contracttype, Address, Env, Vec, U256};

use crate::ledger::Side;

#[contractclient(name = "ControllerClient")]
pub trait Controller {
    fn get_all_markets(env: Env) -> Vec<Address>;
}

#[contractclient(name = "LendingMarketClient")]
pub trait LendingMarket {
    fn balance_of(env: Env, account: Address) -> u128;
    /// `(principal, interest_index)` of the account's last borrow action.
    fn borrow_snapshot(env: Env, account: Address) -> (u128, u128);
    fn borrow_index(env: Env) -> u128;
}

#[contractclient(name = "EligibilityManagerClient")]
pub trait EligibilityManager {
    fn refresh(env: Env, account: Address) -> (bool, bool);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionState {
    pub index: U256,
    pub timestamp: u64,
}

#[contractclient(name = "RewardDistributorClient")]
pub trait RewardDistributor {
    fn update_distribution_state(
        env: Env,
        caller: Address,
        market: Address,
        side: Side,
        eligible_total: u128,
    );
    fn update_reward(
        env: Env,
        caller: Address,
        market: Address,
        account: Address,
        side: Side,
        eligible_balance: u128,
    );
    fn distribution_supply_state(env: Env, market: Address) -> DistributionState;
    fn distribution_borrow_state(env: Env, market: Address) -> DistributionState;
    fn claim(env: Env, caller: Address, accounts: Vec<Address>);
    fn claim_bounty(env: Env, caller: Address, account: Address, hunter: Address) -> (u128, u128);
}
