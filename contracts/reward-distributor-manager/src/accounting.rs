use soroban_sdk::{vec, Address, Env, Vec};

use crate::constants::EXP_SCALE;
use crate::errors::Error;
use crate::events::{EligibilityChanged, MarketAdded};
use crate::helpers::mul_div;
use crate::interfaces::{EligibilityManagerClient, LendingMarketClient, RewardDistributorClient};
use crate::ledger::{self, Change, Side};
use crate::storage::*;

/// A balance change reported by a hook. Borrow amounts are in underlying
/// and get normalised by the market's borrow index before hitting the ledger.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Action {
    pub side: Side,
    pub change: Change,
}

impl Action {
    pub fn supply(change: Change) -> Self {
        Action {
            side: Side::Supply,
            change,
        }
    }

    pub fn borrow(change: Change) -> Self {
        Action {
            side: Side::Borrow,
            change,
        }
    }
}

/// Brings every distributor's index for `(market, side)` up to now and
/// settles `accounts` against it with their current eligible balances.
pub(crate) fn settle(env: &Env, market: &Address, side: Side, accounts: &Vec<Address>) {
    let distributors = read_distributors(env);
    if distributors.is_empty() {
        return;
    }
    let me = env.current_contract_address();
    let total = ledger::total(env, market, side);
    for distributor in distributors.iter() {
        let client = RewardDistributorClient::new(env, &distributor);
        client.update_distribution_state(&me, market, &side, &total);
        for account in accounts.iter() {
            let balance = ledger::balance(env, market, &account, side);
            client.update_reward(&me, market, &account, &side, &balance);
        }
    }
}

pub(crate) fn settle_one(env: &Env, market: &Address, side: Side, account: &Address) {
    settle(env, market, side, &vec![env, account.clone()]);
}

/// Settle first, then overwrite. Unchanged balances are left alone.
fn resync(env: &Env, market: &Address, account: &Address, side: Side, target: u128) {
    if ledger::balance(env, market, account, side) == target {
        return;
    }
    settle_one(env, market, side, account);
    ledger::set_balance(env, market, account, side, target);
}

/// Fresh eligibility from the eligibility manager. Stale prices abort.
pub(crate) fn evaluate(env: &Env, account: &Address) -> Result<bool, Error> {
    let manager = read_eligibility_manager(env).ok_or(Error::EligibilityManagerNotSet)?;
    let (eligible, valid) = EligibilityManagerClient::new(env, &manager).refresh(account);
    if !valid {
        return Err(Error::InvalidEligibility);
    }
    Ok(eligible)
}

/// Counts every current balance of `account` from now on.
pub(crate) fn join(env: &Env, account: &Address) {
    for market in read_markets(env).iter() {
        let client = LendingMarketClient::new(env, &market);
        let supply = client.balance_of(account);
        let (principal, interest_index) = client.borrow_snapshot(account);
        let borrow = mul_div(env, principal, EXP_SCALE, interest_index);
        resync(env, &market, account, Side::Supply, supply);
        resync(env, &market, account, Side::Borrow, borrow);
    }
    ledger::write_eligible(env, account, true);
    EligibilityChanged {
        account: account.clone(),
        eligible: true,
    }
    .publish(env);
}

/// Settles and zeroes every eligible balance of `account`.
pub(crate) fn leave(env: &Env, account: &Address) {
    for market in read_markets(env).iter() {
        resync(env, &market, account, Side::Supply, 0);
        resync(env, &market, account, Side::Borrow, 0);
    }
    ledger::write_eligible(env, account, false);
    EligibilityChanged {
        account: account.clone(),
        eligible: false,
    }
    .publish(env);
}

/// Applies a transition if eligibility changed; returns the new flag.
pub(crate) fn transition(env: &Env, account: &Address, eligible: bool) -> bool {
    match (ledger::is_eligible(env, account), eligible) {
        (false, true) => join(env, account),
        (true, false) => leave(env, account),
        _ => {}
    }
    eligible
}

/// Core of every hook.
///
/// Without a refresh only the stored flag counts: an eligible account gets
/// the raw delta, anyone else is left untouched even if the action would
/// have made them eligible. With a refresh, a change of eligibility
/// resyncs every market (join) or zeroes them (leave) and the delta is
/// already part of that.
pub(crate) fn on_action(
    env: &Env,
    market: &Address,
    account: &Address,
    action: Option<Action>,
    refresh: bool,
) -> Result<(), Error> {
    let was_eligible = ledger::is_eligible(env, account);
    let eligible = if refresh {
        evaluate(env, account)?
    } else {
        was_eligible
    };
    if was_eligible != eligible {
        transition(env, account, eligible);
        return Ok(());
    }
    if !eligible {
        return Ok(());
    }
    let Some(action) = action else {
        return Ok(());
    };
    let change = match action.side {
        Side::Supply => action.change,
        Side::Borrow => {
            let index = LendingMarketClient::new(env, market).borrow_index();
            match action.change {
                Change::Increase(amount) => Change::Increase(mul_div(env, amount, EXP_SCALE, index)),
                Change::Decrease(amount) => Change::Decrease(mul_div(env, amount, EXP_SCALE, index)),
            }
        }
    };
    settle_one(env, market, action.side, account);
    ledger::apply(env, market, account, action.side, change);
    Ok(())
}

/// Adds `market` to the local market mirror if it is not there yet.
pub(crate) fn track_market(env: &Env, market: &Address) {
    if set_insert(env, &DataKey::Markets, DataKey::MarketPos(market.clone()), market) {
        MarketAdded {
            market: market.clone(),
        }
        .publish(env);
    }
}
