use soroban_sdk::{contract, contractimpl, token, Address, Env, Vec, U256};

use crate::constants::{MAX_BOUNTY_RATIO, TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::distribution::{accrued, advance, split_bounty, DistributionState, Side};
use crate::errors::Error;
use crate::events::*;
use crate::interfaces::{ControllerClient, ManagerClient};
use crate::storage::*;

/// Compound-style dual-index distributor for a single reward token.
///
/// Settlement and payout entry points are reserved for the reward
/// distributor manager, which owns the eligible balances the indices are
/// computed over.
#[contract]
pub struct RewardDistributor;

#[contractimpl]
impl RewardDistributor {
    /// Starts paused with no speeds configured.
    pub fn initialize(
        env: Env,
        owner: Address,
        controller: Address,
        manager: Address,
    ) -> Result<(), Error> {
        let instance = env.storage().instance();
        if instance.has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();
        instance.set(&DataKey::Owner, &owner);
        instance.set(&DataKey::Controller, &controller);
        instance.set(&DataKey::Manager, &manager);
        instance.set(&DataKey::Paused, &true);
        instance.set(&DataKey::BountyRatio, &0u128);
        instance.extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
        Ok(())
    }

    pub fn is_reward_distributor(_env: Env) -> bool {
        true
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        read_address(&env, &DataKey::Owner)
    }

    pub fn controller(env: Env) -> Result<Address, Error> {
        read_address(&env, &DataKey::Controller)
    }

    pub fn manager(env: Env) -> Result<Address, Error> {
        read_address(&env, &DataKey::Manager)
    }

    pub fn reward_token(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::RewardToken)
    }

    pub fn treasury(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Treasury)
    }

    pub fn bounty_ratio(env: Env) -> u128 {
        read_bounty_ratio(&env)
    }

    pub fn paused(env: Env) -> bool {
        is_paused(&env)
    }

    pub fn distribution_supply_state(env: Env, market: Address) -> DistributionState {
        read_state(&env, Side::Supply, &market)
    }

    pub fn distribution_borrow_state(env: Env, market: Address) -> DistributionState {
        read_state(&env, Side::Borrow, &market)
    }

    pub fn distribution_supply_speed(env: Env, market: Address) -> u128 {
        read_speed(&env, Side::Supply, &market)
    }

    pub fn distribution_borrow_speed(env: Env, market: Address) -> u128 {
        read_speed(&env, Side::Borrow, &market)
    }

    pub fn supplier_index(env: Env, market: Address, account: Address) -> U256 {
        read_account_index(&env, Side::Supply, &market, &account)
    }

    pub fn borrower_index(env: Env, market: Address, account: Address) -> U256 {
        read_account_index(&env, Side::Borrow, &market, &account)
    }

    /// Accrued, unclaimed reward of `account`.
    pub fn reward(env: Env, account: Address) -> u128 {
        read_reward(&env, &account)
    }

    // Manager entry points

    pub fn update_distribution_state(
        env: Env,
        caller: Address,
        market: Address,
        side: Side,
        eligible_total: u128,
    ) -> Result<(), Error> {
        require_manager(&env, &caller)?;
        update_state(&env, &market, side, eligible_total);
        Ok(())
    }

    /// Settles `account` against the current index using its eligible
    /// balance from before the pending ledger change.
    pub fn update_reward(
        env: Env,
        caller: Address,
        market: Address,
        account: Address,
        side: Side,
        eligible_balance: u128,
    ) -> Result<(), Error> {
        require_manager(&env, &caller)?;
        settle_account(&env, &market, &account, side, eligible_balance);
        Ok(())
    }

    /// Pays out the accrued reward of every account in `accounts`.
    pub fn claim(env: Env, caller: Address, accounts: Vec<Address>) -> Result<(), Error> {
        require_manager(&env, &caller)?;
        let mut payouts: Vec<(Address, u128)> = Vec::new(&env);
        for account in accounts.iter() {
            let amount = read_reward(&env, &account);
            if amount > 0 {
                payouts.push_back((account, amount));
            }
        }
        if payouts.is_empty() {
            return Ok(());
        }
        let (token, treasury) = payout_config(&env)?;
        for (account, amount) in payouts.iter() {
            write_reward(&env, &account, 0);
            token.transfer_from(
                &env.current_contract_address(),
                &treasury,
                &account,
                &to_i128(amount),
            );
            RewardClaimed { account, amount }.publish(&env);
        }
        Ok(())
    }

    /// Pays `account` its accrued reward minus the bounty, which goes to
    /// `hunter`. Returns `(account_share, hunter_share)`.
    pub fn claim_bounty(
        env: Env,
        caller: Address,
        account: Address,
        hunter: Address,
    ) -> Result<(u128, u128), Error> {
        require_manager(&env, &caller)?;
        let reward = read_reward(&env, &account);
        if reward == 0 {
            return Ok((0, 0));
        }
        let (token, treasury) = payout_config(&env)?;
        let (account_share, bounty) = split_bounty(&env, reward, read_bounty_ratio(&env));
        write_reward(&env, &account, 0);
        let me = env.current_contract_address();
        if account_share > 0 {
            token.transfer_from(&me, &treasury, &account, &to_i128(account_share));
        }
        if bounty > 0 {
            token.transfer_from(&me, &treasury, &hunter, &to_i128(bounty));
        }
        BountyPaid {
            account,
            hunter,
            reward,
            bounty,
        }
        .publish(&env);
        Ok((account_share, bounty))
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

    pub fn set_reward_token(env: Env, reward_token: Address) -> Result<(), Error> {
        require_owner(&env)?;
        let old_token: Option<Address> = env.storage().instance().get(&DataKey::RewardToken);
        if old_token.as_ref() == Some(&reward_token) {
            return Err(Error::SameRewardToken);
        }
        env.storage()
            .instance()
            .set(&DataKey::RewardToken, &reward_token);
        NewRewardToken {
            old_token,
            new_token: reward_token,
        }
        .publish(&env);
        Ok(())
    }

    pub fn set_treasury(env: Env, treasury: Address) -> Result<(), Error> {
        require_owner(&env)?;
        let old_treasury: Option<Address> = env.storage().instance().get(&DataKey::Treasury);
        if old_treasury.as_ref() == Some(&treasury) {
            return Err(Error::SameTreasuryAddress);
        }
        env.storage().instance().set(&DataKey::Treasury, &treasury);
        NewTreasury {
            old_treasury,
            new_treasury: treasury,
        }
        .publish(&env);
        Ok(())
    }

    /// `ratio` is scaled by 1e18 and capped at 10%.
    pub fn set_bounty_ratio(env: Env, ratio: u128) -> Result<(), Error> {
        require_owner(&env)?;
        if ratio > MAX_BOUNTY_RATIO {
            return Err(Error::RatioTooHigh);
        }
        let old_ratio = read_bounty_ratio(&env);
        env.storage().instance().set(&DataKey::BountyRatio, &ratio);
        NewBountyRatio {
            old_ratio,
            new_ratio: ratio,
        }
        .publish(&env);
        Ok(())
    }

    /// Settles every configured market, then zeroes all speeds.
    pub fn pause(env: Env) -> Result<(), Error> {
        require_owner(&env)?;
        let manager = ManagerClient::new(&env, &read_address(&env, &DataKey::Manager)?);
        for market in read_speed_markets(&env).iter() {
            apply_speed(&env, &manager, &market, Side::Supply, 0);
            apply_speed(&env, &manager, &market, Side::Borrow, 0);
        }
        env.storage().instance().set(&DataKey::Paused, &true);
        DistributionPaused { paused: true }.publish(&env);
        Ok(())
    }

    pub fn unpause(
        env: Env,
        supply_markets: Vec<Address>,
        supply_speeds: Vec<u128>,
        borrow_markets: Vec<Address>,
        borrow_speeds: Vec<u128>,
    ) -> Result<(), Error> {
        require_owner(&env)?;
        env.storage().instance().set(&DataKey::Paused, &false);
        DistributionPaused { paused: false }.publish(&env);
        set_speeds(
            &env,
            &supply_markets,
            &supply_speeds,
            &borrow_markets,
            &borrow_speeds,
        )
    }

    pub fn set_distribution_speeds(
        env: Env,
        supply_markets: Vec<Address>,
        supply_speeds: Vec<u128>,
        borrow_markets: Vec<Address>,
        borrow_speeds: Vec<u128>,
    ) -> Result<(), Error> {
        require_owner(&env)?;
        if is_paused(&env) {
            return Err(Error::Paused);
        }
        set_speeds(
            &env,
            &supply_markets,
            &supply_speeds,
            &borrow_markets,
            &borrow_speeds,
        )
    }
}

fn update_state(env: &Env, market: &Address, side: Side, eligible_total: u128) {
    let state = read_state(env, side, market);
    let speed = read_speed(env, side, market);
    let next = advance(env, &state, speed, eligible_total, env.ledger().timestamp());
    write_state(env, side, market, &next);
}

fn settle_account(env: &Env, market: &Address, account: &Address, side: Side, balance: u128) {
    let index = read_state(env, side, market).index;
    let snapshot = read_account_index(env, side, market, account);
    let delta = accrued(env, balance, &index, &snapshot);
    write_account_index(env, side, market, account, &index);
    if delta == 0 {
        return;
    }
    write_reward(env, account, read_reward(env, account) + delta);
    match side {
        Side::Supply => DistributedSupplierReward {
            market: market.clone(),
            account: account.clone(),
            delta,
            index,
        }
        .publish(env),
        Side::Borrow => DistributedBorrowerReward {
            market: market.clone(),
            account: account.clone(),
            delta,
            index,
        }
        .publish(env),
    }
}

fn payout_config(env: &Env) -> Result<(token::Client<'_>, Address), Error> {
    let token: Address = env
        .storage()
        .instance()
        .get(&DataKey::RewardToken)
        .ok_or(Error::RewardTokenNotSet)?;
    let treasury: Address = env
        .storage()
        .instance()
        .get(&DataKey::Treasury)
        .ok_or(Error::TreasuryNotSet)?;
    Ok((token::Client::new(env, &token), treasury))
}

fn set_speeds(
    env: &Env,
    supply_markets: &Vec<Address>,
    supply_speeds: &Vec<u128>,
    borrow_markets: &Vec<Address>,
    borrow_speeds: &Vec<u128>,
) -> Result<(), Error> {
    if supply_markets.len() != supply_speeds.len() || borrow_markets.len() != borrow_speeds.len() {
        return Err(Error::LengthMismatch);
    }
    let controller = ControllerClient::new(env, &read_address(env, &DataKey::Controller)?);
    let manager = ManagerClient::new(env, &read_address(env, &DataKey::Manager)?);
    for (market, speed) in supply_markets.iter().zip(supply_speeds.iter()) {
        if !controller.has_market(&market) {
            return Err(Error::InvalidMarket);
        }
        apply_speed(env, &manager, &market, Side::Supply, speed);
    }
    for (market, speed) in borrow_markets.iter().zip(borrow_speeds.iter()) {
        if !controller.has_market(&market) {
            return Err(Error::InvalidMarket);
        }
        apply_speed(env, &manager, &market, Side::Borrow, speed);
    }
    Ok(())
}

/// Accrues the old speed up to now before installing the new one.
fn apply_speed(env: &Env, manager: &ManagerClient, market: &Address, side: Side, speed: u128) {
    let eligible_total = match side {
        Side::Supply => manager.eligible_total_supply(market),
        Side::Borrow => manager.eligible_total_borrow(market),
    };
    update_state(env, market, side, eligible_total);
    write_speed(env, side, market, speed);
    remember_speed_market(env, market);
    match side {
        Side::Supply => NewSupplySpeed {
            market: market.clone(),
            speed,
        }
        .publish(env),
        Side::Borrow => NewBorrowSpeed {
            market: market.clone(),
            speed,
        }
        .publish(env),
    }
}
