use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    CallerIsNotController = 3,
    InvalidEligibilityManager = 4,
    EligibilityManagerNotSet = 5,
    InvalidEligibility = 6,
    DistributorAlreadyExists = 7,
    DistributorNotExist = 8,
    InvalidRewardDistributor = 9,
    MarketNotListed = 10,
    DistributorHasAccrued = 11,
}
