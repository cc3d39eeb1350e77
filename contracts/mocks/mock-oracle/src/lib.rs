#![no_std]
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

#[contracttype]
enum OracleKey {
    Price(Address),
}

#[contracttype]
#[derive(Clone)]
struct OraclePrice {
    price: u128,
    valid: bool,
}

/// Price feed returning `(price, valid)` per asset, prices scaled by 1e18.
#[contract]
pub struct MockOracle;

#[contractimpl]
impl MockOracle {
    pub fn set_price(env: Env, asset: Address, price: u128) {
        let valid = read(&env, &asset).map(|p| p.valid).unwrap_or(true);
        env.storage()
            .persistent()
            .set(&OracleKey::Price(asset), &OraclePrice { price, valid });
    }

    pub fn set_status(env: Env, asset: Address, valid: bool) {
        let price = read(&env, &asset).map(|p| p.price).unwrap_or(0);
        env.storage()
            .persistent()
            .set(&OracleKey::Price(asset), &OraclePrice { price, valid });
    }

    /// Unknown assets report a zero, invalid price.
    pub fn get_underlying_price_and_status(env: Env, asset: Address) -> (u128, bool) {
        match read(&env, &asset) {
            Some(p) => (p.price, p.valid && p.price > 0),
            None => (0, false),
        }
    }
}

fn read(env: &Env, asset: &Address) -> Option<OraclePrice> {
    env.storage()
        .persistent()
        .get(&OracleKey::Price(asset.clone()))
}
