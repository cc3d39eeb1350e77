//! Eligible-balance ledger: per market and account, the part of the supply
//! and borrow balances that belongs to eligible accounts, plus per-market
//! totals that always equal the sum of the per-account entries.

use soroban_sdk::{contracttype, Address, Env};

use crate::constants::{TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::events::{EligibleBorrowUpdated, EligibleSupplyUpdated};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Supply,
    Borrow,
}

#[contracttype]
enum LedgerKey {
    Eligible(Address),
    Balance(Side, Address, Address), // (side, market, account)
    Total(Side, Address),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Change {
    Increase(u128),
    Decrease(u128),
}

pub(crate) fn is_eligible(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&LedgerKey::Eligible(account.clone()))
        .unwrap_or(false)
}

pub(crate) fn write_eligible(env: &Env, account: &Address, eligible: bool) {
    let key = LedgerKey::Eligible(account.clone());
    env.storage().persistent().set(&key, &eligible);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn balance(env: &Env, market: &Address, account: &Address, side: Side) -> u128 {
    env.storage()
        .persistent()
        .get(&LedgerKey::Balance(side, market.clone(), account.clone()))
        .unwrap_or(0)
}

pub(crate) fn total(env: &Env, market: &Address, side: Side) -> u128 {
    env.storage()
        .persistent()
        .get(&LedgerKey::Total(side, market.clone()))
        .unwrap_or(0)
}

/// Overwrites the account's eligible balance, moving the total by the same
/// amount.
pub(crate) fn set_balance(env: &Env, market: &Address, account: &Address, side: Side, new_balance: u128) {
    let old_balance = balance(env, market, account, side);
    if old_balance == new_balance {
        return;
    }
    let old_total = total(env, market, side);
    let new_total = if new_balance > old_balance {
        old_total + (new_balance - old_balance)
    } else {
        old_total - (old_balance - new_balance)
    };

    let persistent = env.storage().persistent();
    let balance_key = LedgerKey::Balance(side, market.clone(), account.clone());
    let total_key = LedgerKey::Total(side, market.clone());
    persistent.set(&balance_key, &new_balance);
    persistent.set(&total_key, &new_total);
    persistent.extend_ttl(&balance_key, TTL_THRESHOLD, TTL_EXTEND_TO);
    persistent.extend_ttl(&total_key, TTL_THRESHOLD, TTL_EXTEND_TO);

    match side {
        Side::Supply => EligibleSupplyUpdated {
            market: market.clone(),
            account: account.clone(),
            balance: new_balance,
            total: new_total,
        }
        .publish(env),
        Side::Borrow => EligibleBorrowUpdated {
            market: market.clone(),
            account: account.clone(),
            balance: new_balance,
            total: new_total,
        }
        .publish(env),
    }
}

/// A decrease past zero is clamped; the total loses the clamped amount only.
pub(crate) fn apply(env: &Env, market: &Address, account: &Address, side: Side, change: Change) {
    let current = balance(env, market, account, side);
    let next = match change {
        Change::Increase(amount) => current + amount,
        Change::Decrease(amount) => current.saturating_sub(amount),
    };
    set_balance(env, market, account, side, next);
}
