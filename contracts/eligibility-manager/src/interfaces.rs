use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "PriceOracleClient")]
pub trait PriceOracle {
    /// Price of `asset`'s underlying scaled by 1e18, and whether it is fresh.
    fn get_underlying_price_and_status(env: Env, asset: Address) -> (u128, bool);
}

#[contractclient(name = "LendingMarketClient")]
pub trait LendingMarket {
    fn balance_of(env: Env, account: Address) -> u128;
    fn exchange_rate_stored(env: Env) -> u128;
}

#[contractclient(name = "ControllerClient")]
pub trait Controller {
    fn has_market(env: Env, market: Address) -> bool;
}

#[contractclient(name = "StakingPoolClient")]
pub trait StakingPool {
    fn balance_of(env: Env, account: Address) -> u128;
    fn staking_token(env: Env) -> Address;
    fn is_staking_pool(env: Env) -> bool;
}
