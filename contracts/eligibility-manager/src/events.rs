use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddBLPStakingPool {
    #[topic]
    pub pool: Address,
    pub underlying: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemoveBLPStakingPool {
    #[topic]
    pub pool: Address,
    pub underlying: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddValidSupply {
    #[topic]
    pub market: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemoveValidSupply {
    #[topic]
    pub market: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewThresholdRatio {
    pub old_ratio: u128,
    pub new_ratio: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewOracle {
    pub old_oracle: Address,
    pub new_oracle: Address,
}

/// Emitted by `refresh` with the freshly computed eligibility.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EligibilityRefreshed {
    #[topic]
    pub account: Address,
    pub eligible: bool,
    pub valid: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewOwner {
    pub old_owner: Address,
    pub new_owner: Address,
}
