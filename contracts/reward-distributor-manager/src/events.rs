use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewEligibilityManager {
    pub old_manager: Option<Address>,
    pub new_manager: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddRewardDistributor {
    #[topic]
    pub distributor: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemoveRewardDistributor {
    #[topic]
    pub distributor: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketAdded {
    #[topic]
    pub market: Address,
}

/// Emitted when an account joins or leaves the eligible set.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EligibilityChanged {
    #[topic]
    pub account: Address,
    pub eligible: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EligibleSupplyUpdated {
    #[topic]
    pub market: Address,
    #[topic]
    pub account: Address,
    pub balance: u128,
    pub total: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EligibleBorrowUpdated {
    #[topic]
    pub market: Address,
    #[topic]
    pub account: Address,
    pub balance: u128,
    pub total: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewOwner {
    pub old_owner: Address,
    pub new_owner: Address,
}
