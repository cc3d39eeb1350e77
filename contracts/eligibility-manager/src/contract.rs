use soroban_sdk::{contract, contractimpl, Address, Env, Vec, U256};

use crate::constants::{TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::errors::Error;
use crate::events::*;
use crate::helpers::*;
use crate::interfaces::{ControllerClient, LendingMarketClient, PriceOracleClient, StakingPoolClient};
use crate::storage::*;

/// Decides whether an account's BLP stake is worth enough, relative to its
/// collateral supply, to earn liquidity-mining rewards.
#[contract]
pub struct EligibilityManager;

#[contractimpl]
impl EligibilityManager {
    /// `threshold_ratio` is scaled by 1e18; zero disables the staking gate.
    pub fn initialize(
        env: Env,
        owner: Address,
        controller: Address,
        oracle: Address,
        threshold_ratio: u128,
    ) -> Result<(), Error> {
        let instance = env.storage().instance();
        if instance.has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();
        instance.set(&DataKey::Owner, &owner);
        instance.set(&DataKey::Controller, &controller);
        instance.set(&DataKey::Oracle, &oracle);
        instance.set(&DataKey::ThresholdRatio, &threshold_ratio);
        instance.extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
        NewThresholdRatio {
            old_ratio: 0,
            new_ratio: threshold_ratio,
        }
        .publish(&env);
        Ok(())
    }

    pub fn is_eligibility_manager(_env: Env) -> bool {
        true
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        read_owner(&env)
    }

    pub fn controller(env: Env) -> Result<Address, Error> {
        read_address(&env, &DataKey::Controller)
    }

    pub fn oracle(env: Env) -> Result<Address, Error> {
        read_address(&env, &DataKey::Oracle)
    }

    pub fn threshold_ratio(env: Env) -> u128 {
        read_threshold(&env)
    }

    pub fn get_blp_staking_pools(env: Env) -> Vec<Address> {
        read_list(&env, &DataKey::BlpPools)
    }

    /// LP token staked in `pool`, if the pool is registered.
    pub fn blp_underlying(env: Env, pool: Address) -> Option<Address> {
        read_underlying(&env, &pool)
    }

    pub fn get_valid_supplies(env: Env) -> Vec<Address> {
        read_list(&env, &DataKey::ValidSupplies)
    }

    pub fn is_valid_supply(env: Env, market: Address) -> bool {
        set_contains(&env, &DataKey::ValidSupplyPos(market))
    }

    pub fn last_refresh(env: Env, account: Address) -> Option<EligibilitySnapshot> {
        read_snapshot(&env, &account)
    }

    /// Sum over valid supply markets of `shares * exchange_rate / 1e18 * price`.
    /// Markets where the account holds nothing are not priced.
    pub fn get_supply_value(env: Env, account: Address) -> Result<(U256, bool), Error> {
        ensure_initialized(&env)?;
        let oracle = PriceOracleClient::new(&env, &read_address(&env, &DataKey::Oracle)?);
        let mut value = u256(&env, 0);
        let mut valid = true;
        for market in read_list(&env, &DataKey::ValidSupplies).iter() {
            let client = LendingMarketClient::new(&env, &market);
            let shares = client.balance_of(&account);
            if shares == 0 {
                continue;
            }
            let (price, price_valid) = oracle.get_underlying_price_and_status(&market);
            valid = valid && price_valid;
            let rate = client.exchange_rate_stored();
            value = value.add(&supply_value_of(&env, shares, rate, price));
        }
        Ok((value, valid))
    }

    /// Sum over registered staking pools of `staked * price(lp)`.
    pub fn get_blp_value(env: Env, account: Address) -> Result<(U256, bool), Error> {
        ensure_initialized(&env)?;
        let oracle = PriceOracleClient::new(&env, &read_address(&env, &DataKey::Oracle)?);
        let mut value = u256(&env, 0);
        let mut valid = true;
        for pool in read_list(&env, &DataKey::BlpPools).iter() {
            let staked = StakingPoolClient::new(&env, &pool).balance_of(&account);
            if staked == 0 {
                continue;
            }
            let Some(underlying) = read_underlying(&env, &pool) else {
                continue;
            };
            let (price, price_valid) = oracle.get_underlying_price_and_status(&underlying);
            valid = valid && price_valid;
            value = value.add(&u256(&env, staked).mul(&u256(&env, price)));
        }
        Ok((value, valid))
    }

    /// Returns `(eligible, valid)`. A zero threshold short-circuits to
    /// `(true, true)` without touching the oracle.
    pub fn is_eligible(env: Env, account: Address) -> Result<(bool, bool), Error> {
        let snapshot = evaluate(&env, &account)?;
        Ok((snapshot.eligible, snapshot.valid))
    }

    /// Same as `is_eligible`, but records the valuation for later inspection.
    pub fn refresh(env: Env, account: Address) -> Result<(bool, bool), Error> {
        let snapshot = evaluate(&env, &account)?;
        write_snapshot(&env, &account, &snapshot);
        EligibilityRefreshed {
            account,
            eligible: snapshot.eligible,
            valid: snapshot.valid,
        }
        .publish(&env);
        Ok((snapshot.eligible, snapshot.valid))
    }

    // Admin

    pub fn set_owner(env: Env, new_owner: Address) -> Result<(), Error> {
        let old_owner = require_owner(&env)?;
        env.storage().instance().set(&DataKey::Owner, &new_owner);
        NewOwner {
            old_owner,
            new_owner,
        }
        .publish(&env);
        Ok(())
    }

    pub fn set_threshold_ratio(env: Env, threshold_ratio: u128) -> Result<(), Error> {
        require_owner(&env)?;
        let old_ratio = read_threshold(&env);
        env.storage()
            .instance()
            .set(&DataKey::ThresholdRatio, &threshold_ratio);
        NewThresholdRatio {
            old_ratio,
            new_ratio: threshold_ratio,
        }
        .publish(&env);
        Ok(())
    }

    pub fn set_oracle(env: Env, oracle: Address) -> Result<(), Error> {
        require_owner(&env)?;
        let old_oracle = read_address(&env, &DataKey::Oracle)?;
        if old_oracle == oracle {
            return Err(Error::InvalidOracle);
        }
        env.storage().instance().set(&DataKey::Oracle, &oracle);
        NewOracle {
            old_oracle,
            new_oracle: oracle,
        }
        .publish(&env);
        Ok(())
    }

    pub fn add_blp_staking_pool(env: Env, pool: Address) -> Result<(), Error> {
        require_owner(&env)?;
        add_pool(&env, &pool)
    }

    pub fn add_blp_staking_pools(env: Env, pools: Vec<Address>) -> Result<(), Error> {
        require_owner(&env)?;
        for pool in pools.iter() {
            add_pool(&env, &pool)?;
        }
        Ok(())
    }

    pub fn remove_blp_staking_pool(env: Env, pool: Address) -> Result<(), Error> {
        require_owner(&env)?;
        remove_pool(&env, &pool)
    }

    pub fn remove_blp_staking_pools(env: Env, pools: Vec<Address>) -> Result<(), Error> {
        require_owner(&env)?;
        for pool in pools.iter() {
            remove_pool(&env, &pool)?;
        }
        Ok(())
    }

    pub fn add_valid_supply(env: Env, market: Address) -> Result<(), Error> {
        require_owner(&env)?;
        add_supply(&env, &market)
    }

    pub fn add_valid_supplies(env: Env, markets: Vec<Address>) -> Result<(), Error> {
        require_owner(&env)?;
        for market in markets.iter() {
            add_supply(&env, &market)?;
        }
        Ok(())
    }

    pub fn remove_valid_supply(env: Env, market: Address) -> Result<(), Error> {
        require_owner(&env)?;
        remove_supply(&env, &market)
    }

    pub fn remove_valid_supplies(env: Env, markets: Vec<Address>) -> Result<(), Error> {
        require_owner(&env)?;
        for market in markets.iter() {
            remove_supply(&env, &market)?;
        }
        Ok(())
    }
}

fn evaluate(env: &Env, account: &Address) -> Result<EligibilitySnapshot, Error> {
    ensure_initialized(env)?;
    let threshold = read_threshold(env);
    let timestamp = env.ledger().timestamp();
    if threshold == 0 {
        return Ok(EligibilitySnapshot {
            eligible: true,
            valid: true,
            blp_value: u256(env, 0),
            supply_value: u256(env, 0),
            timestamp,
        });
    }
    let (blp_value, blp_valid) = EligibilityManager::get_blp_value(env.clone(), account.clone())?;
    let (supply_value, supply_valid) =
        EligibilityManager::get_supply_value(env.clone(), account.clone())?;
    let valid = blp_valid && supply_valid;
    let eligible = valid && meets_threshold(env, &blp_value, &supply_value, threshold);
    Ok(EligibilitySnapshot {
        eligible,
        valid,
        blp_value,
        supply_value,
        timestamp,
    })
}

fn add_pool(env: &Env, pool: &Address) -> Result<(), Error> {
    if set_contains(env, &DataKey::BlpPoolPos(pool.clone())) {
        return Err(Error::StakingPoolAlreadyExists);
    }
    if !probe_capability(env, pool, "is_staking_pool") {
        return Err(Error::InvalidStakingPool);
    }
    let underlying = StakingPoolClient::new(env, pool).staking_token();
    set_insert(env, &DataKey::BlpPools, DataKey::BlpPoolPos(pool.clone()), pool);
    let key = DataKey::BlpUnderlying(pool.clone());
    env.storage().persistent().set(&key, &underlying);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    AddBLPStakingPool {
        pool: pool.clone(),
        underlying,
    }
    .publish(env);
    Ok(())
}

fn remove_pool(env: &Env, pool: &Address) -> Result<(), Error> {
    let Some(underlying) = read_underlying(env, pool) else {
        return Err(Error::StakingPoolNotExist);
    };
    set_remove(env, &DataKey::BlpPools, DataKey::BlpPoolPos, pool);
    env.storage()
        .persistent()
        .remove(&DataKey::BlpUnderlying(pool.clone()));
    RemoveBLPStakingPool {
        pool: pool.clone(),
        underlying,
    }
    .publish(env);
    Ok(())
}

fn add_supply(env: &Env, market: &Address) -> Result<(), Error> {
    if set_contains(env, &DataKey::ValidSupplyPos(market.clone())) {
        return Err(Error::ValidSupplyAlreadyExists);
    }
    let controller = read_address(env, &DataKey::Controller)?;
    if !ControllerClient::new(env, &controller).has_market(market) {
        return Err(Error::InvalidSupply);
    }
    set_insert(
        env,
        &DataKey::ValidSupplies,
        DataKey::ValidSupplyPos(market.clone()),
        market,
    );
    AddValidSupply {
        market: market.clone(),
    }
    .publish(env);
    Ok(())
}

fn remove_supply(env: &Env, market: &Address) -> Result<(), Error> {
    if !set_remove(env, &DataKey::ValidSupplies, DataKey::ValidSupplyPos, market) {
        return Err(Error::ValidSupplyNotExist);
    }
    RemoveValidSupply {
        market: market.clone(),
    }
    .publish(env);
    Ok(())
}
