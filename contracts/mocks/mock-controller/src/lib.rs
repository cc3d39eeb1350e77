#![no_std]
use soroban_sdk::{contract, contractclient, contractimpl, contracttype, Address, Env, Vec};

#[contracttype]
enum DataKey {
    Admin,
    Markets,
    HookSink,
}

#[contractclient(name = "MarketClient")]
pub trait Market {
    fn mint(env: Env, account: Address, shares: u128);
    fn redeem(env: Env, account: Address, shares: u128);
    fn transfer(env: Env, from: Address, to: Address, shares: u128);
    fn borrow(env: Env, account: Address, amount: u128);
    fn repay(env: Env, account: Address, amount: u128);
}

/// Hook surface of the reward distributor manager, as seen by the controller.
#[contractclient(name = "HookSinkClient")]
pub trait HookSink {
    fn after_mint(
        env: Env,
        caller: Address,
        market: Address,
        minter: Address,
        mint_shares: u128,
        refresh_eligibility: bool,
    );
    fn after_redeem(
        env: Env,
        caller: Address,
        market: Address,
        redeemer: Address,
        redeem_shares: u128,
        refresh_eligibility: bool,
    );
    fn after_borrow(
        env: Env,
        caller: Address,
        market: Address,
        borrower: Address,
        borrow_amount: u128,
        refresh_eligibility: bool,
    );
    fn after_repay_borrow(
        env: Env,
        caller: Address,
        market: Address,
        payer: Address,
        borrower: Address,
        repay_amount: u128,
        refresh_eligibility: bool,
    );
    fn after_liquidate_borrow(
        env: Env,
        caller: Address,
        market_borrowed: Address,
        market_collateral: Address,
        liquidator: Address,
        borrower: Address,
        repay_amount: u128,
        seize_shares: u128,
        refresh_eligibility: bool,
    );
    fn after_seize(
        env: Env,
        caller: Address,
        market_collateral: Address,
        market_borrowed: Address,
        liquidator: Address,
        borrower: Address,
        seize_shares: u128,
        refresh_eligibility: bool,
    );
    fn after_transfer(
        env: Env,
        caller: Address,
        market: Address,
        from: Address,
        to: Address,
        amount: u128,
        refresh_eligibility: bool,
    );
    fn after_flashloan(
        env: Env,
        caller: Address,
        market: Address,
        to: Address,
        amount: u128,
        refresh_eligibility: bool,
    );
}

/// Stand-in for the lending controller: keeps the market list, drives
/// balance changes on the markets and dispatches the reward hooks after
/// each action completes.
#[contract]
pub struct MockController;

#[contractimpl]
impl MockController {
    pub fn initialize(env: Env, admin: Address) {
        if env.storage().instance().has(&DataKey::Admin) {
            panic!("already initialized");
        }
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::Markets, &Vec::<Address>::new(&env));
    }

    pub fn add_market(env: Env, market: Address) {
        require_admin(&env);
        let mut markets = Self::get_all_markets(env.clone());
        if markets.contains(&market) {
            panic!("market exists");
        }
        markets.push_back(market);
        env.storage().instance().set(&DataKey::Markets, &markets);
    }

    pub fn set_hook_sink(env: Env, sink: Address) {
        require_admin(&env);
        env.storage().instance().set(&DataKey::HookSink, &sink);
    }

    pub fn get_all_markets(env: Env) -> Vec<Address> {
        env.storage()
            .instance()
            .get(&DataKey::Markets)
            .unwrap_or(Vec::new(&env))
    }

    pub fn has_market(env: Env, market: Address) -> bool {
        Self::get_all_markets(env).contains(&market)
    }

    pub fn mint(env: Env, market: Address, account: Address, shares: u128, refresh: bool) {
        MarketClient::new(&env, &market).mint(&account, &shares);
        if let Some(sink) = hook_sink(&env) {
            sink.after_mint(&self_address(&env), &market, &account, &shares, &refresh);
        }
    }

    pub fn redeem(env: Env, market: Address, account: Address, shares: u128, refresh: bool) {
        MarketClient::new(&env, &market).redeem(&account, &shares);
        if let Some(sink) = hook_sink(&env) {
            sink.after_redeem(&self_address(&env), &market, &account, &shares, &refresh);
        }
    }

    pub fn borrow(env: Env, market: Address, account: Address, amount: u128, refresh: bool) {
        MarketClient::new(&env, &market).borrow(&account, &amount);
        if let Some(sink) = hook_sink(&env) {
            sink.after_borrow(&self_address(&env), &market, &account, &amount, &refresh);
        }
    }

    pub fn repay_borrow(
        env: Env,
        market: Address,
        payer: Address,
        borrower: Address,
        amount: u128,
        refresh: bool,
    ) {
        MarketClient::new(&env, &market).repay(&borrower, &amount);
        if let Some(sink) = hook_sink(&env) {
            sink.after_repay_borrow(
                &self_address(&env),
                &market,
                &payer,
                &borrower,
                &amount,
                &refresh,
            );
        }
    }

    pub fn transfer(
        env: Env,
        market: Address,
        from: Address,
        to: Address,
        shares: u128,
        refresh: bool,
    ) {
        MarketClient::new(&env, &market).transfer(&from, &to, &shares);
        if let Some(sink) = hook_sink(&env) {
            sink.after_transfer(&self_address(&env), &market, &from, &to, &shares, &refresh);
        }
    }

    /// Repay on the borrowed market, move collateral shares to the
    /// liquidator, then report repay, seize and liquidation in that order.
    #[allow(clippy::too_many_arguments)]
    pub fn liquidate_borrow(
        env: Env,
        market_borrowed: Address,
        market_collateral: Address,
        liquidator: Address,
        borrower: Address,
        repay_amount: u128,
        seize_shares: u128,
        refresh: bool,
    ) {
        MarketClient::new(&env, &market_borrowed).repay(&borrower, &repay_amount);
        MarketClient::new(&env, &market_collateral).transfer(&borrower, &liquidator, &seize_shares);
        if let Some(sink) = hook_sink(&env) {
            let me = self_address(&env);
            sink.after_repay_borrow(
                &me,
                &market_borrowed,
                &liquidator,
                &borrower,
                &repay_amount,
                &refresh,
            );
            sink.after_seize(
                &me,
                &market_collateral,
                &market_borrowed,
                &liquidator,
                &borrower,
                &seize_shares,
                &refresh,
            );
            sink.after_liquidate_borrow(
                &me,
                &market_borrowed,
                &market_collateral,
                &liquidator,
                &borrower,
                &repay_amount,
                &seize_shares,
                &refresh,
            );
        }
    }

    pub fn flashloan(env: Env, market: Address, to: Address, amount: u128, refresh: bool) {
        if let Some(sink) = hook_sink(&env) {
            sink.after_flashloan(&self_address(&env), &market, &to, &amount, &refresh);
        }
    }
}

fn require_admin(env: &Env) {
    let admin: Address = env
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("admin not set");
    admin.require_auth();
}

fn self_address(env: &Env) -> Address {
    env.current_contract_address()
}

fn hook_sink(env: &Env) -> Option<HookSinkClient<'_>> {
    env.storage()
        .instance()
        .get::<_, Address>(&DataKey::HookSink)
        .map(|addr| HookSinkClient::new(env, &addr))
}
