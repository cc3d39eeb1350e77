use soroban_sdk::{contractevent, Address, U256};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewRewardToken {
    pub old_token: Option<Address>,
    pub new_token: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewTreasury {
    pub old_treasury: Option<Address>,
    pub new_treasury: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewBountyRatio {
    pub old_ratio: u128,
    pub new_ratio: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionPaused {
    pub paused: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewSupplySpeed {
    #[topic]
    pub market: Address,
    pub speed: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewBorrowSpeed {
    #[topic]
    pub market: Address,
    pub speed: u128,
}

/// Mirrors Compound's DistributedSupplierComp event.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributedSupplierReward {
    #[topic]
    pub market: Address,
    #[topic]
    pub account: Address,
    pub delta: u128,
    pub index: U256,
}

/// Mirrors Compound's DistributedBorrowerComp event.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributedBorrowerReward {
    #[topic]
    pub market: Address,
    #[topic]
    pub account: Address,
    pub delta: u128,
    pub index: U256,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimed {
    #[topic]
    pub account: Address,
    pub amount: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BountyPaid {
    #[topic]
    pub account: Address,
    #[topic]
    pub hunter: Address,
    pub reward: u128,
    pub bounty: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewOwner {
    pub old_owner: Address,
    pub new_owner: Address,
}
