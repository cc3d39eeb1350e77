use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    CallerIsNotStakingPool = 3,
    SameTreasuryAddress = 4,
    SameRewardRate = 5,
    NothingToRescue = 6,
}
