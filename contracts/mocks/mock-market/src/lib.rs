#![no_std]
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, U256};

const EXP_SCALE: u128 = 1_000_000_000_000_000_000;

#[contracttype]
enum DataKey {
    Controller,
    ExchangeRate,
    BorrowIndex,
    Shares(Address),
    BorrowSnapshot(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BorrowSnapshot {
    pub principal: u128,
    pub interest_index: u128,
}

/// Minimal lending market: share balances, a borrow index and borrow
/// snapshots. Balance changes are driven by the controller only.
#[contract]
pub struct MockMarket;

#[contractimpl]
impl MockMarket {
    pub fn initialize(env: Env, controller: Address) {
        if env.storage().instance().has(&DataKey::Controller) {
            panic!("already initialized");
        }
        env.storage().instance().set(&DataKey::Controller, &controller);
        env.storage()
            .instance()
            .set(&DataKey::ExchangeRate, &EXP_SCALE);
        env.storage().instance().set(&DataKey::BorrowIndex, &EXP_SCALE);
    }

    pub fn set_exchange_rate(env: Env, rate: u128) {
        env.storage().instance().set(&DataKey::ExchangeRate, &rate);
    }

    pub fn set_borrow_index(env: Env, index: u128) {
        env.storage().instance().set(&DataKey::BorrowIndex, &index);
    }

    pub fn mint(env: Env, account: Address, shares: u128) {
        require_controller(&env);
        let bal = Self::balance_of(env.clone(), account.clone());
        write_shares(&env, &account, bal + shares);
    }

    pub fn redeem(env: Env, account: Address, shares: u128) {
        require_controller(&env);
        let bal = Self::balance_of(env.clone(), account.clone());
        if shares > bal {
            panic!("insufficient shares");
        }
        write_shares(&env, &account, bal - shares);
    }

    pub fn transfer(env: Env, from: Address, to: Address, shares: u128) {
        require_controller(&env);
        let from_bal = Self::balance_of(env.clone(), from.clone());
        if shares > from_bal {
            panic!("insufficient shares");
        }
        write_shares(&env, &from, from_bal - shares);
        let to_bal = Self::balance_of(env.clone(), to.clone());
        write_shares(&env, &to, to_bal + shares);
    }

    pub fn borrow(env: Env, account: Address, amount: u128) {
        require_controller(&env);
        let current = Self::borrow_balance_stored(env.clone(), account.clone());
        write_borrow(&env, &account, current + amount);
    }

    pub fn repay(env: Env, account: Address, amount: u128) {
        require_controller(&env);
        let current = Self::borrow_balance_stored(env.clone(), account.clone());
        let repaid = if amount > current { current } else { amount };
        write_borrow(&env, &account, current - repaid);
    }

    pub fn balance_of(env: Env, account: Address) -> u128 {
        env.storage()
            .persistent()
            .get(&DataKey::Shares(account))
            .unwrap_or(0)
    }

    pub fn exchange_rate_stored(env: Env) -> u128 {
        env.storage()
            .instance()
            .get(&DataKey::ExchangeRate)
            .unwrap_or(EXP_SCALE)
    }

    pub fn borrow_index(env: Env) -> u128 {
        env.storage()
            .instance()
            .get(&DataKey::BorrowIndex)
            .unwrap_or(EXP_SCALE)
    }

    /// `(principal, interest_index)` as of the account's last borrow action.
    pub fn borrow_snapshot(env: Env, account: Address) -> (u128, u128) {
        let snap: Option<BorrowSnapshot> = env
            .storage()
            .persistent()
            .get(&DataKey::BorrowSnapshot(account));
        match snap {
            Some(s) => (s.principal, s.interest_index),
            None => (0, 0),
        }
    }

    pub fn borrow_balance_stored(env: Env, account: Address) -> u128 {
        let (principal, interest_index) = Self::borrow_snapshot(env.clone(), account);
        if interest_index == 0 {
            return 0;
        }
        let index = Self::borrow_index(env.clone());
        U256::from_u128(&env, principal)
            .mul(&U256::from_u128(&env, index))
            .div(&U256::from_u128(&env, interest_index))
            .to_u128()
            .expect("borrow balance exceeds u128")
    }
}

fn require_controller(env: &Env) {
    let controller: Address = env
        .storage()
        .instance()
        .get(&DataKey::Controller)
        .expect("controller not set");
    controller.require_auth();
}

fn write_shares(env: &Env, account: &Address, shares: u128) {
    env.storage()
        .persistent()
        .set(&DataKey::Shares(account.clone()), &shares);
}

fn write_borrow(env: &Env, account: &Address, principal: u128) {
    let interest_index = MockMarket::borrow_index(env.clone());
    env.storage().persistent().set(
        &DataKey::BorrowSnapshot(account.clone()),
        &BorrowSnapshot {
            principal,
            interest_index,
        },
    );
}
