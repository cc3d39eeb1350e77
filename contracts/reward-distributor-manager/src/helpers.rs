use soroban_sdk::{Address, Env, IntoVal, InvokeError, Symbol, TryFromVal, Val, Vec, U256};

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

/// `a * b / c` through 256-bit intermediates; zero when `c` is zero.
pub(crate) fn mul_div(env: &Env, a: u128, b: u128, c: u128) -> u128 {
    if c == 0 {
        return 0;
    }
    let quotient = U256::from_u128(env, a)
        .mul(&U256::from_u128(env, b))
        .div(&U256::from_u128(env, c));
    match quotient.to_u128() {
        Some(quotient) => quotient,
        None => panic!("mul_div result exceeds u128"),
    }
}
