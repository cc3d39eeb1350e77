use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    StakingPoolAlreadyExists = 3,
    StakingPoolNotExist = 4,
    InvalidStakingPool = 5,
    ValidSupplyAlreadyExists = 6,
    ValidSupplyNotExist = 7,
    InvalidSupply = 8,
    InvalidOracle = 9,
}
