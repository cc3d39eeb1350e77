use proptest::prelude::*;
use reward_distributor::constants::{DOUBLE_SCALE, EXP_SCALE, MAX_BOUNTY_RATIO};
use reward_distributor::distribution::{accrued, advance, split_bounty, DistributionState};
use soroban_sdk::Env;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn index_never_decreases(
        steps in prop::collection::vec((0u64..10_000, 0u128..1_000_000_000_000_000_000, 0u128..1_000_000_000_000_000_000_000_000u128), 1..12)
    ) {
        let env = Env::default();
        let mut state = DistributionState::initial(&env, 0);
        let mut now = 0u64;
        for (dt, speed, total) in steps {
            now += dt;
            let next = advance(&env, &state, speed, total, now);
            prop_assert!(next.index >= state.index);
            let moved = next.index > state.index;
            prop_assert_eq!(moved, dt > 0 && speed > 0 && total > 0);
            prop_assert_eq!(next.timestamp, now);
            state = next;
        }
    }

    #[test]
    fn accrual_does_not_depend_on_partition(
        balance in 1u128..1_000_000_000_000_000_000_000,
        extra in 0u128..1_000_000_000_000_000_000_000,
        speed in 1u128..1_000_000_000_000_000_000,
        chunks in prop::collection::vec(1u64..5_000, 1..10)
    ) {
        let env = Env::default();
        let total = balance + extra;
        let start = DistributionState::initial(&env, 0);

        let elapsed: u64 = chunks.iter().sum();
        let whole = advance(&env, &start, speed, total, elapsed);
        let at_once = accrued(&env, balance, &whole.index, &start.index);

        let mut state = start.clone();
        let mut snapshot = start.index.clone();
        let mut piecewise = 0u128;
        let mut now = 0u64;
        for dt in chunks.iter() {
            now += dt;
            state = advance(&env, &state, speed, total, now);
            piecewise += accrued(&env, balance, &state.index, &snapshot);
            snapshot = state.index.clone();
        }

        // each settlement floors at most one unit
        let slack = chunks.len() as u128 + 1;
        prop_assert!(piecewise <= at_once);
        prop_assert!(at_once - piecewise <= slack);
    }

    #[test]
    fn sole_holder_receives_whole_emission(
        balance in 1u128..1_000_000_000_000u128,
        speed in 1u128..1_000_000u128,
        elapsed in 1u64..100_000
    ) {
        let env = Env::default();
        let start = DistributionState::initial(&env, 0);
        let next = advance(&env, &start, speed, balance, elapsed);
        let earned = accrued(&env, balance, &next.index, &start.index);
        let emitted = speed * elapsed as u128;
        prop_assert!(earned <= emitted);
        prop_assert!(emitted - earned <= 1);
    }

    #[test]
    fn bounty_split_conserves_reward(
        reward in 0u128..1_000_000_000_000_000_000_000,
        ratio in 0u128..=MAX_BOUNTY_RATIO
    ) {
        let env = Env::default();
        let (to_account, to_hunter) = split_bounty(&env, reward, ratio);
        prop_assert_eq!(to_account + to_hunter, reward);
        prop_assert_eq!(to_hunter, reward * ratio / EXP_SCALE);
    }
}

#[test]
fn index_scale_is_double_exp() {
    assert_eq!(DOUBLE_SCALE, EXP_SCALE * EXP_SCALE);
}
