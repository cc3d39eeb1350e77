use soroban_sdk::{Address, Env, IntoVal, InvokeError, Symbol, TryFromVal, Val, Vec, U256};

use crate::constants::EXP_SCALE;

/// Invokes `func` on `contract`, mapping any revert or host failure to `None`.
pub(crate) fn try_call_contract<T, A>(env: &Env, contract: &Address, func: &str, args: A) -> Option<T>
where
    T: TryFromVal<Env, Val>,
    A: IntoVal<Env, Vec<Val>>,
{
    let symbol = Symbol::new(env, func);
    let args_val: Vec<Val> = args.into_val(env);
    match env.try_invoke_contract::<T, InvokeError>(contract, &symbol, args_val) {
        Ok(Ok(val)) => Some(val),
        _ => None,
    }
}

/// True only when `contract` answers `func` with `true`.
pub(crate) fn probe_capability(env: &Env, contract: &Address, func: &str) -> bool {
    try_call_contract::<bool, _>(env, contract, func, ()).unwrap_or(false)
}

pub(crate) fn u256(env: &Env, v: u128) -> U256 {
    U256::from_u128(env, v)
}

/// `amount * exchange_rate / 1e18 * price`
pub(crate) fn supply_value_of(env: &Env, shares: u128, exchange_rate: u128, price: u128) -> U256 {
    u256(env, shares)
        .mul(&u256(env, exchange_rate))
        .div(&u256(env, EXP_SCALE))
        .mul(&u256(env, price))
}

/// `blp_value >= threshold * supply_value / 1e18`
pub(crate) fn meets_threshold(env: &Env, blp_value: &U256, supply_value: &U256, threshold: u128) -> bool {
    let required = supply_value
        .mul(&u256(env, threshold))
        .div(&u256(env, EXP_SCALE));
    *blp_value >= required
}
