use soroban_sdk::{contractclient, Address, Env};

use crate::errors::Error;

/// Callbacks the lending controller invokes after every balance-changing
/// action. `caller` must be the controller itself.
#[contractclient(name = "LendingHookSinkClient")]
pub trait LendingHookSink {
    fn after_mint(
        env: Env,
        caller: Address,
        market: Address,
        minter: Address,
        mint_shares: u128,
        refresh_eligibility: bool,
    ) -> Result<(), Error>;

    fn after_redeem(
        env: Env,
        caller: Address,
        market: Address,
        redeemer: Address,
        redeem_shares: u128,
        refresh_eligibility: bool,
    ) -> Result<(), Error>;

    fn after_borrow(
        env: Env,
        caller: Address,
        market: Address,
        borrower: Address,
        borrow_amount: u128,
        refresh_eligibility: bool,
    ) -> Result<(), Error>;

    fn after_repay_borrow(
        env: Env,
        caller: Address,
        market: Address,
        payer: Address,
        borrower: Address,
        repay_amount: u128,
        refresh_eligibility: bool,
    ) -> Result<(), Error>;

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
    ) -> Result<(), Error>;

    fn after_seize(
        env: Env,
        caller: Address,
        market_collateral: Address,
        market_borrowed: Address,
        liquidator: Address,
        borrower: Address,
        seize_shares: u128,
        refresh_eligibility: bool,
    ) -> Result<(), Error>;

    fn after_transfer(
        env: Env,
        caller: Address,
        market: Address,
        from: Address,
        to: Address,
        amount: u128,
        refresh_eligibility: bool,
    ) -> Result<(), Error>;

    fn after_flashloan(
        env: Env,
        caller: Address,
        market: Address,
        to: Address,
        amount: u128,
        refresh_eligibility: bool,
    ) -> Result<(), Error>;
}
