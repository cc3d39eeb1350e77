use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Staked {
    #[topic]
    pub spender: Address,
    #[topic]
    pub recipient: Address,
    pub amount: u128,
    pub total_staked: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawn {
    #[topic]
    pub account: Address,
    pub amount: u128,
    pub total_staked: u128,
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
pub struct NewOwner {
    pub old_owner: Address,
    pub new_owner: Address,
}
