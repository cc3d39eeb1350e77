#![cfg(test)]
use super::*;
use blp_staking_pool as bsp;
use mock_controller as mc;
use mock_market as mm;
use mock_oracle as mo;
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{token, vec, Address, Env, U256};

const E18: u128 = 1_000_000_000_000_000_000;

struct Setup<'a> {
    env: Env,
    owner: Address,
    controller_id: Address,
    controller: mc::MockControllerClient<'a>,
    market: Address,
    market_client: mm::MockMarketClient<'a>,
    oracle_id: Address,
    oracle: mo::MockOracleClient<'a>,
    lp: Address,
    pool_id: Address,
    pool: bsp::BlpStakingPoolClient<'a>,
    em: EligibilityManagerClient<'a>,
}

/// One listed market and one staking pool, both priced at 1 and
/// registered with the eligibility manager.
fn setup<'a>(threshold: u128) -> Setup<'a> {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);

    let controller_id = env.register(mc::MockController, ());
    let controller = mc::MockControllerClient::new(&env, &controller_id);
    controller.initialize(&owner);
    let market = env.register(mm::MockMarket, ());
    let market_client = mm::MockMarketClient::new(&env, &market);
    market_client.initialize(&controller_id);
    controller.add_market(&market);

    let oracle_id = env.register(mo::MockOracle, ());
    let oracle = mo::MockOracleClient::new(&env, &oracle_id);
    oracle.set_price(&market, &E18);

    let lp = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    oracle.set_price(&lp, &E18);
    let pool_id = env.register(bsp::BlpStakingPool, ());
    let pool = bsp::BlpStakingPoolClient::new(&env, &pool_id);
    pool.initialize(&owner, &lp);

    let em_id = env.register(EligibilityManager, ());
    let em = EligibilityManagerClient::new(&env, &em_id);
    em.initialize(&owner, &controller_id, &oracle_id, &threshold);
    em.add_blp_staking_pool(&pool_id);
    em.add_valid_supply(&market);

    Setup {
        env,
        owner,
        controller_id,
        controller,
        market,
        market_client,
        oracle_id,
        oracle,
        lp,
        pool_id,
        pool,
        em,
    }
}

fn stake(s: &Setup, account: &Address, amount: u128) {
    token::StellarAssetClient::new(&s.env, &s.lp).mint(account, &(amount as i128));
    s.pool.stake(account, account, &amount);
}

fn u256(env: &Env, v: u128) -> U256 {
    U256::from_u128(env, v)
}

#[test]
fn test_initialize() {
    let s = setup(E18 / 100);
    assert!(s.em.is_eligibility_manager());
    assert_eq!(s.em.owner(), s.owner);
    assert_eq!(s.em.controller(), s.controller_id);
    assert_eq!(s.em.oracle(), s.oracle_id);
    assert_eq!(s.em.threshold_ratio(), E18 / 100);
    assert_eq!(s.em.get_blp_staking_pools(), vec![&s.env, s.pool_id.clone()]);
    assert_eq!(s.em.blp_underlying(&s.pool_id), Some(s.lp.clone()));
    assert_eq!(s.em.get_valid_supplies(), vec![&s.env, s.market.clone()]);
    assert!(s.em.is_valid_supply(&s.market));
    assert_eq!(
        s.em.try_initialize(&s.owner, &s.controller_id, &s.oracle_id, &0u128),
        Err(Ok(Error::AlreadyInitialized))
    );
}

#[test]
fn test_uninitialized_reads_fail() {
    let env = Env::default();
    let id = env.register(EligibilityManager, ());
    let em = EligibilityManagerClient::new(&env, &id);
    let user = Address::generate(&env);
    assert_eq!(em.try_is_eligible(&user), Err(Ok(Error::NotInitialized)));
    assert_eq!(em.try_owner(), Err(Ok(Error::NotInitialized)));
}

#[test]
fn test_supply_value_uses_exchange_rate_and_price() {
    let s = setup(E18 / 100);
    let user = Address::generate(&s.env);
    s.controller.mint(&s.market, &user, &(10 * E18), &false);
    s.market_client.set_exchange_rate(&(2 * E18));
    s.oracle.set_price(&s.market, &(3 * E18));

    // 10 shares * 2 rate * 3 price, scaled by 1e18 twice
    let expected = u256(&s.env, 60 * E18).mul(&u256(&s.env, E18));
    assert_eq!(s.em.get_supply_value(&user), (expected, true));
}

#[test]
fn test_empty_positions_skip_the_oracle() {
    let s = setup(E18 / 100);
    let user = Address::generate(&s.env);
    s.oracle.set_status(&s.market, &false);
    s.oracle.set_status(&s.lp, &false);
    // nothing held, so the bad prices are never consulted
    assert_eq!(s.em.get_supply_value(&user), (u256(&s.env, 0), true));
    assert_eq!(s.em.get_blp_value(&user), (u256(&s.env, 0), true));
}

#[test]
fn test_blp_value() {
    let s = setup(E18 / 100);
    let user = Address::generate(&s.env);
    stake(&s, &user, 5 * E18);
    s.oracle.set_price(&s.lp, &(E18 / 2));
    let expected = u256(&s.env, 5 * E18).mul(&u256(&s.env, E18 / 2));
    assert_eq!(s.em.get_blp_value(&user), (expected, true));
}

#[test]
fn test_threshold_comparison() {
    let s = setup(E18 / 100);
    let user = Address::generate(&s.env);
    s.controller.mint(&s.market, &user, &(100 * E18), &false);
    assert_eq!(s.em.is_eligible(&user), (false, true));

    // exactly 1% of the supply value
    stake(&s, &user, E18);
    assert_eq!(s.em.is_eligible(&user), (true, true));

    s.controller.mint(&s.market, &user, &1u128, &false);
    assert_eq!(s.em.is_eligible(&user), (false, true));
}

#[test]
fn test_threshold_boundary_with_real_prices() {
    let s = setup(E18 / 100);
    s.oracle.set_price(&s.market, &(2_533 * E18));
    s.oracle.set_price(&s.lp, &14_919_437_706_257_265u128);
    let user = Address::generate(&s.env);
    s.controller.mint(&s.market, &user, &(10 * E18), &false);

    stake(&s, &user, 16_977 * E18);
    assert_eq!(s.em.is_eligible(&user), (false, true));
    stake(&s, &user, E18);
    assert_eq!(s.em.is_eligible(&user), (true, true));
}

#[test]
fn test_zero_threshold_short_circuits() {
    let s = setup(0);
    let user = Address::generate(&s.env);
    s.controller.mint(&s.market, &user, &(100 * E18), &false);
    s.oracle.set_status(&s.market, &false);
    assert_eq!(s.em.is_eligible(&user), (true, true));
}

#[test]
fn test_invalid_price_marks_result_invalid() {
    let s = setup(E18 / 100);
    let user = Address::generate(&s.env);
    s.controller.mint(&s.market, &user, &(100 * E18), &false);
    stake(&s, &user, 10 * E18);
    assert_eq!(s.em.is_eligible(&user), (true, true));

    s.oracle.set_status(&s.lp, &false);
    assert_eq!(s.em.is_eligible(&user), (false, false));
    s.oracle.set_status(&s.lp, &true);
    s.oracle.set_status(&s.market, &false);
    assert_eq!(s.em.is_eligible(&user), (false, false));
}

#[test]
fn test_removed_supply_is_not_counted() {
    let s = setup(E18 / 100);
    let user = Address::generate(&s.env);
    s.controller.mint(&s.market, &user, &(100 * E18), &false);
    assert_eq!(s.em.is_eligible(&user), (false, true));

    s.em.remove_valid_supply(&s.market);
    assert!(!s.em.is_valid_supply(&s.market));
    // no counted supply, nothing to cover
    assert_eq!(s.em.is_eligible(&user), (true, true));
}

#[test]
fn test_refresh_records_snapshot() {
    let s = setup(E18 / 100);
    let user = Address::generate(&s.env);
    s.env.ledger().set_timestamp(4_242);
    s.controller.mint(&s.market, &user, &(100 * E18), &false);
    stake(&s, &user, 2 * E18);
    assert_eq!(s.em.last_refresh(&user), None);

    assert_eq!(s.em.refresh(&user), (true, true));
    let snapshot = s.em.last_refresh(&user).unwrap();
    assert!(snapshot.eligible);
    assert!(snapshot.valid);
    assert_eq!(snapshot.timestamp, 4_242);
    assert_eq!(
        snapshot.supply_value,
        u256(&s.env, 100 * E18).mul(&u256(&s.env, E18))
    );
    assert_eq!(
        snapshot.blp_value,
        u256(&s.env, 2 * E18).mul(&u256(&s.env, E18))
    );
}

#[test]
fn test_staking_pool_registry() {
    let s = setup(E18 / 100);
    assert_eq!(
        s.em.try_add_blp_staking_pool(&s.pool_id),
        Err(Ok(Error::StakingPoolAlreadyExists))
    );
    // the oracle does not answer the capability probe
    assert_eq!(
        s.em.try_add_blp_staking_pool(&s.oracle_id),
        Err(Ok(Error::InvalidStakingPool))
    );
    let stranger = Address::generate(&s.env);
    assert_eq!(
        s.em.try_remove_blp_staking_pool(&stranger),
        Err(Ok(Error::StakingPoolNotExist))
    );

    s.em.remove_blp_staking_pools(&vec![&s.env, s.pool_id.clone()]);
    assert_eq!(s.em.get_blp_staking_pools().len(), 0);
    assert_eq!(s.em.blp_underlying(&s.pool_id), None);

    s.em.add_blp_staking_pools(&vec![&s.env, s.pool_id.clone()]);
    assert_eq!(s.em.blp_underlying(&s.pool_id), Some(s.lp.clone()));
}

#[test]
fn test_remove_keeps_remaining_pools() {
    let s = setup(E18 / 100);
    let other_lp = s
        .env
        .register_stellar_asset_contract_v2(Address::generate(&s.env))
        .address();
    let other_id = s.env.register(bsp::BlpStakingPool, ());
    bsp::BlpStakingPoolClient::new(&s.env, &other_id).initialize(&s.owner, &other_lp);
    s.em.add_blp_staking_pool(&other_id);

    s.em.remove_blp_staking_pool(&s.pool_id);
    assert_eq!(s.em.get_blp_staking_pools(), vec![&s.env, other_id.clone()]);
    // the moved entry can still be removed
    s.em.remove_blp_staking_pool(&other_id);
    assert_eq!(s.em.get_blp_staking_pools().len(), 0);
}

#[test]
fn test_valid_supply_registry() {
    let s = setup(E18 / 100);
    assert_eq!(
        s.em.try_add_valid_supply(&s.market),
        Err(Ok(Error::ValidSupplyAlreadyExists))
    );
    let unlisted = s.env.register(mm::MockMarket, ());
    assert_eq!(
        s.em.try_add_valid_supply(&unlisted),
        Err(Ok(Error::InvalidSupply))
    );
    assert_eq!(
        s.em.try_remove_valid_supply(&unlisted),
        Err(Ok(Error::ValidSupplyNotExist))
    );

    s.controller.add_market(&unlisted);
    s.em.add_valid_supplies(&vec![&s.env, unlisted.clone()]);
    assert_eq!(
        s.em.get_valid_supplies(),
        vec![&s.env, s.market.clone(), unlisted.clone()]
    );
    s.em.remove_valid_supplies(&vec![&s.env, s.market.clone(), unlisted]);
    assert_eq!(s.em.get_valid_supplies().len(), 0);
}

#[test]
fn test_set_oracle_and_threshold() {
    let s = setup(E18 / 100);
    assert_eq!(
        s.em.try_set_oracle(&s.oracle_id),
        Err(Ok(Error::InvalidOracle))
    );
    let new_oracle = s.env.register(mo::MockOracle, ());
    s.em.set_oracle(&new_oracle);
    assert_eq!(s.em.oracle(), new_oracle);

    s.em.set_threshold_ratio(&(E18 / 10));
    assert_eq!(s.em.threshold_ratio(), E18 / 10);
}

#[test]
fn test_set_owner() {
    let s = setup(0);
    let next = Address::generate(&s.env);
    s.em.set_owner(&next);
    assert_eq!(s.em.owner(), next);
}

#[test]
#[should_panic]
fn test_set_threshold_requires_owner() {
    let s = setup(0);
    s.env.set_auths(&[]);
    s.em.set_threshold_ratio(&E18);
}
