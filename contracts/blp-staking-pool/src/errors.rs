use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    StakeAmountIsZero = 3,
    WithdrawAmountIsZero = 4,
    InsufficientBalance = 5,
    RewardDistributorAlreadyExists = 6,
    RewardDistributorNotExist = 7,
}
