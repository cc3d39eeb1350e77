use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "ControllerClient")]
pub trait Controller {
    fn has_market(env: Env, market: Address) -> bool;
}

/// Eligible totals are read from the manager only on admin paths; during
/// hooks the manager hands them in directly.
#[contractclient(name = "ManagerClient")]
pub trait Manager {
    fn eligible_total_supply(env: Env, market: Address) -> u128;
    fn eligible_total_borrow(env: Env, market: Address) -> u128;
}
