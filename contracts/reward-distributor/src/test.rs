#![cfg(test)]
use super::*;
use crate::constants::{DOUBLE_SCALE, EXP_SCALE, INITIAL_INDEX};
use mock_controller as mc;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{contract, contractimpl, contracttype, token, vec, Address, Env, Vec, U256};

// Stands in for the manager on admin paths that read eligible totals.
#[contract]
struct MockManager;

#[contracttype]
enum ManagerKey {
    Supply(Address),
    Borrow(Address),
}

#[contractimpl]
impl MockManager {
    pub fn set_totals(env: Env, market: Address, supply: u128, borrow: u128) {
        env.storage()
            .persistent()
            .set(&ManagerKey::Supply(market.clone()), &supply);
        env.storage()
            .persistent()
            .set(&ManagerKey::Borrow(market), &borrow);
    }
    pub fn eligible_total_supply(env: Env, market: Address) -> u128 {
        env.storage()
            .persistent()
            .get(&ManagerKey::Supply(market))
            .unwrap_or(0)
    }
    pub fn eligible_total_borrow(env: Env, market: Address) -> u128 {
        env.storage()
            .persistent()
            .get(&ManagerKey::Borrow(market))
            .unwrap_or(0)
    }
}

struct Setup<'a> {
    env: Env,
    owner: Address,
    manager: Address,
    manager_client: MockManagerClient<'a>,
    market: Address,
    dist_id: Address,
    dist: RewardDistributorClient<'a>,
}

fn setup<'a>() -> Setup<'a> {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);
    let owner = Address::generate(&env);

    let controller_id = env.register(mc::MockController, ());
    let controller = mc::MockControllerClient::new(&env, &controller_id);
    controller.initialize(&owner);
    let market = Address::generate(&env);
    controller.add_market(&market);

    let manager = env.register(MockManager, ());
    let manager_client = MockManagerClient::new(&env, &manager);

    let dist_id = env.register(RewardDistributor, ());
    let dist = RewardDistributorClient::new(&env, &dist_id);
    dist.initialize(&owner, &controller_id, &manager);
    Setup {
        env,
        owner,
        manager,
        manager_client,
        market,
        dist_id,
        dist,
    }
}

fn advance(env: &Env, secs: u64) {
    let now = env.ledger().timestamp();
    env.ledger().set_timestamp(now + secs);
}

fn start_supply(s: &Setup, speed: u128) {
    s.dist.unpause(
        &vec![&s.env, s.market.clone()],
        &vec![&s.env, speed],
        &Vec::new(&s.env),
        &Vec::new(&s.env),
    );
}

/// Settle state and account, the way the manager does before a balance change.
fn settle(s: &Setup, account: &Address, side: Side, total: u128, balance: u128) {
    s.dist
        .update_distribution_state(&s.manager, &s.market, &side, &total);
    s.dist
        .update_reward(&s.manager, &s.market, account, &side, &balance);
}

fn fund_treasury(s: &Setup, allowance: i128) -> (Address, Address) {
    let treasury = Address::generate(&s.env);
    let reward_token = s
        .env
        .register_stellar_asset_contract_v2(Address::generate(&s.env))
        .address();
    token::StellarAssetClient::new(&s.env, &reward_token).mint(&treasury, &1_000_000i128);
    token::Client::new(&s.env, &reward_token).approve(&treasury, &s.dist_id, &allowance, &10_000u32);
    s.dist.set_reward_token(&reward_token);
    s.dist.set_treasury(&treasury);
    (reward_token, treasury)
}

#[test]
fn test_initial_state() {
    let s = setup();
    assert!(s.dist.paused());
    assert!(s.dist.is_reward_distributor());
    assert_eq!(s.dist.bounty_ratio(), 0);
    assert_eq!(s.dist.manager(), s.manager);
    let state = s.dist.distribution_supply_state(&s.market);
    assert_eq!(state.index, U256::from_u128(&s.env, INITIAL_INDEX));
    assert_eq!(
        s.dist.try_initialize(&s.owner, &s.owner, &s.manager),
        Err(Ok(Error::AlreadyInitialized))
    );
}

#[test]
fn test_bounty_ratio_cap() {
    let s = setup();
    s.dist.set_bounty_ratio(&(EXP_SCALE / 10));
    assert_eq!(s.dist.bounty_ratio(), EXP_SCALE / 10);
    assert_eq!(
        s.dist.try_set_bounty_ratio(&(EXP_SCALE / 10 + 1)),
        Err(Ok(Error::RatioTooHigh))
    );
}

#[test]
fn test_treasury_and_token_must_change() {
    let s = setup();
    let treasury = Address::generate(&s.env);
    s.dist.set_treasury(&treasury);
    assert_eq!(
        s.dist.try_set_treasury(&treasury),
        Err(Ok(Error::SameTreasuryAddress))
    );
    let token = Address::generate(&s.env);
    s.dist.set_reward_token(&token);
    assert_eq!(
        s.dist.try_set_reward_token(&token),
        Err(Ok(Error::SameRewardToken))
    );
}

#[test]
fn test_settlement_is_manager_only() {
    let s = setup();
    let stranger = Address::generate(&s.env);
    assert_eq!(
        s.dist
            .try_update_distribution_state(&stranger, &s.market, &Side::Supply, &1u128),
        Err(Ok(Error::CallerIsNotRewardManager))
    );
    assert_eq!(
        s.dist
            .try_update_reward(&stranger, &s.market, &stranger, &Side::Borrow, &1u128),
        Err(Ok(Error::CallerIsNotRewardManager))
    );
    assert_eq!(
        s.dist.try_claim(&stranger, &vec![&s.env, stranger.clone()]),
        Err(Ok(Error::CallerIsNotRewardManager))
    );
    assert_eq!(
        s.dist.try_claim_bounty(&stranger, &stranger, &stranger),
        Err(Ok(Error::CallerIsNotRewardManager))
    );
}

#[test]
fn test_speeds_rejected_while_paused() {
    let s = setup();
    assert_eq!(
        s.dist.try_set_distribution_speeds(
            &vec![&s.env, s.market.clone()],
            &vec![&s.env, 1u128],
            &Vec::new(&s.env),
            &Vec::new(&s.env),
        ),
        Err(Ok(Error::Paused))
    );
}

#[test]
fn test_unpause_installs_speeds() {
    let s = setup();
    s.dist.unpause(
        &vec![&s.env, s.market.clone()],
        &vec![&s.env, 10u128],
        &vec![&s.env, s.market.clone()],
        &vec![&s.env, 4u128],
    );
    assert!(!s.dist.paused());
    assert_eq!(s.dist.distribution_supply_speed(&s.market), 10);
    assert_eq!(s.dist.distribution_borrow_speed(&s.market), 4);

    s.dist.set_distribution_speeds(
        &Vec::new(&s.env),
        &Vec::new(&s.env),
        &vec![&s.env, s.market.clone()],
        &vec![&s.env, 0u128],
    );
    assert_eq!(s.dist.distribution_borrow_speed(&s.market), 0);
}

#[test]
fn test_speed_validation() {
    let s = setup();
    let unknown = Address::generate(&s.env);
    assert_eq!(
        s.dist.try_unpause(
            &vec![&s.env, unknown],
            &vec![&s.env, 1u128],
            &Vec::new(&s.env),
            &Vec::new(&s.env),
        ),
        Err(Ok(Error::InvalidMarket))
    );
    assert_eq!(
        s.dist.try_unpause(
            &vec![&s.env, s.market.clone()],
            &Vec::new(&s.env),
            &Vec::new(&s.env),
            &Vec::new(&s.env),
        ),
        Err(Ok(Error::LengthMismatch))
    );
}

#[test]
fn test_supply_accrual() {
    let s = setup();
    let alice = Address::generate(&s.env);
    start_supply(&s, 10);
    settle(&s, &alice, Side::Supply, 0, 0);

    advance(&s.env, 5);
    settle(&s, &alice, Side::Supply, 100, 100);
    assert_eq!(s.dist.reward(&alice), 50);
    assert_eq!(
        s.dist.supplier_index(&s.market, &alice),
        s.dist.distribution_supply_state(&s.market).index
    );
}

#[test]
fn test_two_suppliers_share_by_balance() {
    let s = setup();
    let alice = Address::generate(&s.env);
    let bob = Address::generate(&s.env);
    start_supply(&s, 100);
    settle(&s, &alice, Side::Supply, 0, 0);
    settle(&s, &bob, Side::Supply, 0, 0);

    advance(&s.env, 10);
    settle(&s, &alice, Side::Supply, 400, 300);
    settle(&s, &bob, Side::Supply, 400, 100);
    assert_eq!(s.dist.reward(&alice), 750);
    assert_eq!(s.dist.reward(&bob), 250);
}

#[test]
fn test_borrow_side_is_independent() {
    let s = setup();
    let alice = Address::generate(&s.env);
    s.dist.unpause(
        &Vec::new(&s.env),
        &Vec::new(&s.env),
        &vec![&s.env, s.market.clone()],
        &vec![&s.env, 7u128],
    );
    settle(&s, &alice, Side::Borrow, 0, 0);
    advance(&s.env, 6);
    settle(&s, &alice, Side::Supply, 50, 50);
    assert_eq!(s.dist.reward(&alice), 0);
    settle(&s, &alice, Side::Borrow, 50, 50);
    assert_eq!(s.dist.reward(&alice), 42);
}

#[test]
fn test_same_instant_update_is_idempotent() {
    let s = setup();
    start_supply(&s, 10);
    advance(&s.env, 3);
    s.dist
        .update_distribution_state(&s.manager, &s.market, &Side::Supply, &10u128);
    let once = s.dist.distribution_supply_state(&s.market);
    s.dist
        .update_distribution_state(&s.manager, &s.market, &Side::Supply, &10u128);
    assert_eq!(s.dist.distribution_supply_state(&s.market), once);
}

#[test]
fn test_pause_freezes_index_but_advances_timestamp() {
    let s = setup();
    s.manager_client.set_totals(&s.market, &100u128, &0u128);
    start_supply(&s, 10);
    advance(&s.env, 5);
    s.dist.pause();
    let at_pause = s.dist.distribution_supply_state(&s.market);
    let expected = U256::from_u128(&s.env, INITIAL_INDEX)
        .add(&U256::from_u128(&s.env, DOUBLE_SCALE / 2));
    assert_eq!(at_pause.index, expected);
    assert_eq!(s.dist.distribution_supply_speed(&s.market), 0);

    advance(&s.env, 10);
    s.dist
        .update_distribution_state(&s.manager, &s.market, &Side::Supply, &100u128);
    let later = s.dist.distribution_supply_state(&s.market);
    assert_eq!(later.index, at_pause.index);
    assert_eq!(later.timestamp, at_pause.timestamp + 10);
}

#[test]
#[should_panic]
fn test_pause_requires_owner() {
    let s = setup();
    s.env.set_auths(&[]);
    s.dist.pause();
}

#[test]
fn test_claim_pays_from_treasury() {
    let s = setup();
    let alice = Address::generate(&s.env);
    let (reward_token, treasury) = fund_treasury(&s, 1_000);
    start_supply(&s, 10);
    settle(&s, &alice, Side::Supply, 0, 0);
    advance(&s.env, 5);
    settle(&s, &alice, Side::Supply, 100, 100);

    s.dist.claim(&s.manager, &vec![&s.env, alice.clone()]);
    let t = token::Client::new(&s.env, &reward_token);
    assert_eq!(t.balance(&alice), 50);
    assert_eq!(t.balance(&treasury), 1_000_000 - 50);
    assert_eq!(s.dist.reward(&alice), 0);
}

#[test]
fn test_claim_without_rewards_needs_no_config() {
    let s = setup();
    let alice = Address::generate(&s.env);
    s.dist.claim(&s.manager, &vec![&s.env, alice]);
}

#[test]
fn test_claim_requires_reward_token() {
    let s = setup();
    let alice = Address::generate(&s.env);
    start_supply(&s, 10);
    settle(&s, &alice, Side::Supply, 0, 0);
    advance(&s.env, 5);
    settle(&s, &alice, Side::Supply, 100, 100);
    assert_eq!(
        s.dist.try_claim(&s.manager, &vec![&s.env, alice]),
        Err(Ok(Error::RewardTokenNotSet))
    );
}

#[test]
#[should_panic]
fn test_claim_fails_on_insufficient_allowance() {
    let s = setup();
    let alice = Address::generate(&s.env);
    fund_treasury(&s, 10);
    start_supply(&s, 10);
    settle(&s, &alice, Side::Supply, 0, 0);
    advance(&s.env, 5);
    settle(&s, &alice, Side::Supply, 100, 100);
    s.dist.claim(&s.manager, &vec![&s.env, alice]);
}

#[test]
fn test_claim_bounty_splits_reward() {
    let s = setup();
    let alice = Address::generate(&s.env);
    let hunter = Address::generate(&s.env);
    let (reward_token, _) = fund_treasury(&s, 10_000);
    s.dist.set_bounty_ratio(&(EXP_SCALE / 10));
    start_supply(&s, 100);
    settle(&s, &alice, Side::Supply, 0, 0);
    advance(&s.env, 10);
    settle(&s, &alice, Side::Supply, 100, 100);
    assert_eq!(s.dist.reward(&alice), 1_000);

    let paid = s.dist.claim_bounty(&s.manager, &alice, &hunter);
    assert_eq!(paid, (900, 100));
    let t = token::Client::new(&s.env, &reward_token);
    assert_eq!(t.balance(&alice), 900);
    assert_eq!(t.balance(&hunter), 100);
    assert_eq!(s.dist.reward(&alice), 0);
}
