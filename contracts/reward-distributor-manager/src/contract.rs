use soroban_sdk::{contract, contractimpl, Address, Env, Vec, U256};

use crate::accounting::{evaluate, leave, on_action, settle, track_market, transition, Action};
use crate::constants::{INITIAL_INDEX, TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::errors::Error;
use crate::events::*;
use crate::helpers::probe_capability;
use crate::hooks::LendingHookSink;
use crate::interfaces::{ControllerClient, RewardDistributorClient};
use crate::ledger::{self, Change, Side};
use crate::storage::*;

/// Receives lending hooks, keeps the eligible-balance ledger and drives every
/// registered reward distributor off it.
#[contract]
pub struct RewardDistributorManager;

#[contractimpl]
impl RewardDistributorManager {
    /// Seeds the market mirror from the controller. No eligibility manager
    /// is set yet; hooks that ask for a refresh fail until one is.
    pub fn initialize(env: Env, owner: Address, controller: Address) -> Result<(), Error> {
        let instance = env.storage().instance();
        if instance.has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();
        instance.set(&DataKey::Owner, &owner);
        instance.set(&DataKey::Controller, &controller);
        instance.extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
        sync_from_controller(&env, &controller);
        Ok(())
    }

    pub fn is_reward_distributor_manager(_env: Env) -> bool {
        true
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        read_address(&env, &DataKey::Owner)
    }

    pub fn controller(env: Env) -> Result<Address, Error> {
        read_address(&env, &DataKey::Controller)
    }

    pub fn eligibility_manager(env: Env) -> Option<Address> {
        read_eligibility_manager(&env)
    }

    pub fn get_markets(env: Env) -> Vec<Address> {
        read_markets(&env)
    }

    pub fn get_reward_distributors(env: Env) -> Vec<Address> {
        read_distributors(&env)
    }

    pub fn get_reward_distributors_length(env: Env) -> u32 {
        read_distributors(&env).len()
    }

    // Ledger reads

    pub fn eligible_supply(env: Env, market: Address, account: Address) -> u128 {
        ledger::balance(&env, &market, &account, Side::Supply)
    }

    pub fn eligible_borrow(env: Env, market: Address, account: Address) -> u128 {
        ledger::balance(&env, &market, &account, Side::Borrow)
    }

    pub fn eligible_total_supply(env: Env, market: Address) -> u128 {
        ledger::total(&env, &market, Side::Supply)
    }

    pub fn eligible_total_borrow(env: Env, market: Address) -> u128 {
        ledger::total(&env, &market, Side::Borrow)
    }

    /// Eligibility as last recorded in the ledger, not re-evaluated.
    pub fn is_eligible(env: Env, account: Address) -> bool {
        ledger::is_eligible(&env, &account)
    }

    /// Picks up markets listed on the controller since the last sync.
    pub fn sync_markets(env: Env) -> Result<(), Error> {
        ensure_initialized(&env)?;
        let controller = read_address(&env, &DataKey::Controller)?;
        sync_from_controller(&env, &controller);
        Ok(())
    }

    // Refresh

    pub fn update_eligible_balance(env: Env, account: Address) -> Result<bool, Error> {
        ensure_initialized(&env)?;
        let eligible = evaluate(&env, &account)?;
        Ok(transition(&env, &account, eligible))
    }

    pub fn update_eligible_balances(env: Env, accounts: Vec<Address>) -> Result<(), Error> {
        ensure_initialized(&env)?;
        for account in accounts.iter() {
            let eligible = evaluate(&env, &account)?;
            transition(&env, &account, eligible);
        }
        Ok(())
    }

    // Accrual triggers

    pub fn update_distribution_state(env: Env, market: Address, side: Side) -> Result<(), Error> {
        ensure_initialized(&env)?;
        settle(&env, &market, side, &Vec::new(&env));
        Ok(())
    }

    pub fn update_reward(env: Env, market: Address, account: Address, side: Side) -> Result<(), Error> {
        ensure_initialized(&env)?;
        settle(&env, &market, side, &Vec::from_array(&env, [account]));
        Ok(())
    }

    // Claims

    /// Settles both sides of `markets` for `accounts`, then pays out every
    /// distributor's accrued balance.
    pub fn claim_reward(env: Env, accounts: Vec<Address>, markets: Vec<Address>) -> Result<(), Error> {
        ensure_initialized(&env)?;
        for market in markets.iter() {
            require_listed(&env, &market)?;
            settle(&env, &market, Side::Supply, &accounts);
            settle(&env, &market, Side::Borrow, &accounts);
        }
        pay_out(&env, &accounts);
        Ok(())
    }

    pub fn claim_rewards(
        env: Env,
        accounts: Vec<Address>,
        supply_markets: Vec<Address>,
        borrow_markets: Vec<Address>,
    ) -> Result<(), Error> {
        ensure_initialized(&env)?;
        for market in supply_markets.iter() {
            require_listed(&env, &market)?;
            settle(&env, &market, Side::Supply, &accounts);
        }
        for market in borrow_markets.iter() {
            require_listed(&env, &market)?;
            settle(&env, &market, Side::Borrow, &accounts);
        }
        pay_out(&env, &accounts);
        Ok(())
    }

    pub fn claim_all_reward(env: Env, accounts: Vec<Address>) -> Result<(), Error> {
        ensure_initialized(&env)?;
        for market in read_markets(&env).iter() {
            settle(&env, &market, Side::Supply, &accounts);
            settle(&env, &market, Side::Borrow, &accounts);
        }
        pay_out(&env, &accounts);
        Ok(())
    }

    /// For each account recorded as eligible that no longer is: removes it
    /// from the ledger and pays its accrued reward, minus the bounty which
    /// goes to `hunter`. Accounts that are still eligible, or were never
    /// recorded as eligible, are skipped.
    pub fn claim_bounty(env: Env, hunter: Address, accounts: Vec<Address>) -> Result<(), Error> {
        ensure_initialized(&env)?;
        hunter.require_auth();
        let me = env.current_contract_address();
        for account in accounts.iter() {
            if !ledger::is_eligible(&env, &account) {
                continue;
            }
            if evaluate(&env, &account)? {
                continue;
            }
            leave(&env, &account);
            for distributor in read_distributors(&env).iter() {
                RewardDistributorClient::new(&env, &distributor).claim_bounty(&me, &account, &hunter);
            }
        }
        Ok(())
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

    pub fn set_eligibility_manager(env: Env, eligibility_manager: Address) -> Result<(), Error> {
        require_owner(&env)?;
        let old_manager = read_eligibility_manager(&env);
        if old_manager.as_ref() == Some(&eligibility_manager) {
            return Err(Error::InvalidEligibilityManager);
        }
        if !probe_capability(&env, &eligibility_manager, "is_eligibility_manager") {
            return Err(Error::InvalidEligibilityManager);
        }
        env.storage()
            .instance()
            .set(&DataKey::EligibilityManager, &eligibility_manager);
        NewEligibilityManager {
            old_manager,
            new_manager: eligibility_manager,
        }
        .publish(&env);
        Ok(())
    }

    pub fn add_reward_distributor(env: Env, distributor: Address) -> Result<(), Error> {
        require_owner(&env)?;
        add_distributor(&env, &distributor)
    }

    pub fn add_reward_distributors(env: Env, distributors: Vec<Address>) -> Result<(), Error> {
        require_owner(&env)?;
        for distributor in distributors.iter() {
            add_distributor(&env, &distributor)?;
        }
        Ok(())
    }

    pub fn remove_reward_distributor(env: Env, distributor: Address) -> Result<(), Error> {
        require_owner(&env)?;
        remove_distributor(&env, &distributor)
    }

    pub fn remove_reward_distributors(env: Env, distributors: Vec<Address>) -> Result<(), Error> {
        require_owner(&env)?;
        for distributor in distributors.iter() {
            remove_distributor(&env, &distributor)?;
        }
        Ok(())
    }
}

#[contractimpl]
impl LendingHookSink for RewardDistributorManager {
    fn after_mint(
        env: Env,
        caller: Address,
        market: Address,
        minter: Address,
        mint_shares: u128,
        refresh_eligibility: bool,
    ) -> Result<(), Error> {
        require_controller(&env, &caller)?;
        track_market(&env, &market);
        on_action(
            &env,
            &market,
            &minter,
            Some(Action::supply(Change::Increase(mint_shares))),
            refresh_eligibility,
        )
    }

    fn after_redeem(
        env: Env,
        caller: Address,
        market: Address,
        redeemer: Address,
        redeem_shares: u128,
        refresh_eligibility: bool,
    ) -> Result<(), Error> {
        require_controller(&env, &caller)?;
        track_market(&env, &market);
        on_action(
            &env,
            &market,
            &redeemer,
            Some(Action::supply(Change::Decrease(redeem_shares))),
            refresh_eligibility,
        )
    }

    fn after_borrow(
        env: Env,
        caller: Address,
        market: Address,
        borrower: Address,
        borrow_amount: u128,
        refresh_eligibility: bool,
    ) -> Result<(), Error> {
        require_controller(&env, &caller)?;
        track_market(&env, &market);
        on_action(
            &env,
            &market,
            &borrower,
            Some(Action::borrow(Change::Increase(borrow_amount))),
            refresh_eligibility,
        )
    }

    fn after_repay_borrow(
        env: Env,
        caller: Address,
        market: Address,
        _payer: Address,
        borrower: Address,
        repay_amount: u128,
        refresh_eligibility: bool,
    ) -> Result<(), Error> {
        require_controller(&env, &caller)?;
        track_market(&env, &market);
        on_action(
            &env,
            &market,
            &borrower,
            Some(Action::borrow(Change::Decrease(repay_amount))),
            refresh_eligibility,
        )
    }

    /// Balance effects arrive through `after_repay_borrow` and `after_seize`;
    /// this only re-evaluates both parties when asked to.
    fn after_liquidate_borrow(
        env: Env,
        caller: Address,
        market_borrowed: Address,
        market_collateral: Address,
        liquidator: Address,
        borrower: Address,
        _repay_amount: u128,
        _seize_shares: u128,
        refresh_eligibility: bool,
    ) -> Result<(), Error> {
        require_controller(&env, &caller)?;
        track_market(&env, &market_borrowed);
        track_market(&env, &market_collateral);
        on_action(&env, &market_borrowed, &borrower, None, refresh_eligibility)?;
        on_action(&env, &market_collateral, &liquidator, None, refresh_eligibility)
    }

    /// Moves `seize_shares` of collateral from borrower to liquidator.
    fn after_seize(
        env: Env,
        caller: Address,
        market_collateral: Address,
        market_borrowed: Address,
        liquidator: Address,
        borrower: Address,
        seize_shares: u128,
        refresh_eligibility: bool,
    ) -> Result<(), Error> {
        require_controller(&env, &caller)?;
        track_market(&env, &market_collateral);
        track_market(&env, &market_borrowed);
        on_action(
            &env,
            &market_collateral,
            &borrower,
            Some(Action::supply(Change::Decrease(seize_shares))),
            refresh_eligibility,
        )?;
        on_action(
            &env,
            &market_collateral,
            &liquidator,
            Some(Action::supply(Change::Increase(seize_shares))),
            refresh_eligibility,
        )
    }

    fn after_transfer(
        env: Env,
        caller: Address,
        market: Address,
        from: Address,
        to: Address,
        amount: u128,
        refresh_eligibility: bool,
    ) -> Result<(), Error> {
        require_controller(&env, &caller)?;
        track_market(&env, &market);
        on_action(
            &env,
            &market,
            &from,
            Some(Action::supply(Change::Decrease(amount))),
            refresh_eligibility,
        )?;
        on_action(
            &env,
            &market,
            &to,
            Some(Action::supply(Change::Increase(amount))),
            refresh_eligibility,
        )
    }

    /// Flashloans leave balances unchanged.
    fn after_flashloan(
        env: Env,
        caller: Address,
        market: Address,
        to: Address,
        _amount: u128,
        refresh_eligibility: bool,
    ) -> Result<(), Error> {
        require_controller(&env, &caller)?;
        track_market(&env, &market);
        on_action(&env, &market, &to, None, refresh_eligibility)
    }
}

fn sync_from_controller(env: &Env, controller: &Address) {
    for market in ControllerClient::new(env, controller).get_all_markets().iter() {
        track_market(env, &market);
    }
}

fn require_listed(env: &Env, market: &Address) -> Result<(), Error> {
    if !set_contains(env, &DataKey::MarketPos(market.clone())) {
        return Err(Error::MarketNotListed);
    }
    Ok(())
}

fn pay_out(env: &Env, accounts: &Vec<Address>) {
    let me = env.current_contract_address();
    for distributor in read_distributors(env).iter() {
        RewardDistributorClient::new(env, &distributor).claim(&me, accounts);
    }
}

/// Accounts without a snapshot settle from the initial index, so only a
/// distributor that has never accrued can join. Its clocks are then moved to
/// now with a zero total so nothing before registration is paid out.
fn add_distributor(env: &Env, distributor: &Address) -> Result<(), Error> {
    if set_contains(env, &DataKey::DistributorPos(distributor.clone())) {
        return Err(Error::DistributorAlreadyExists);
    }
    if env
        .storage()
        .persistent()
        .has(&DataKey::Retired(distributor.clone()))
    {
        return Err(Error::DistributorHasAccrued);
    }
    if !probe_capability(env, distributor, "is_reward_distributor") {
        return Err(Error::InvalidRewardDistributor);
    }
    sync_from_controller(env, &read_address(env, &DataKey::Controller)?);

    let me = env.current_contract_address();
    let client = RewardDistributorClient::new(env, distributor);
    let initial = U256::from_u128(env, INITIAL_INDEX);
    let markets = read_markets(env);
    for market in markets.iter() {
        if client.distribution_supply_state(&market).index != initial
            || client.distribution_borrow_state(&market).index != initial
        {
            return Err(Error::DistributorHasAccrued);
        }
    }
    for market in markets.iter() {
        client.update_distribution_state(&me, &market, &Side::Supply, &0);
        client.update_distribution_state(&me, &market, &Side::Borrow, &0);
    }

    set_insert(
        env,
        &DataKey::Distributors,
        DataKey::DistributorPos(distributor.clone()),
        distributor,
    );
    AddRewardDistributor {
        distributor: distributor.clone(),
    }
    .publish(env);
    Ok(())
}

fn remove_distributor(env: &Env, distributor: &Address) -> Result<(), Error> {
    if !set_remove(env, &DataKey::Distributors, DataKey::DistributorPos, distributor) {
        return Err(Error::DistributorNotExist);
    }
    let key = DataKey::Retired(distributor.clone());
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    RemoveRewardDistributor {
        distributor: distributor.clone(),
    }
    .publish(env);
    Ok(())
}
