use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    CallerIsNotRewardManager = 3,
    Paused = 4,
    LengthMismatch = 5,
    InvalidMarket = 6,
    RatioTooHigh = 7,
    SameTreasuryAddress = 8,
    TreasuryNotSet = 9,
    RewardTokenNotSet = 10,
    SameRewardToken = 11,
}
