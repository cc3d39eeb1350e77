#![no_std]

pub mod constants;
mod contract;
pub mod distribution;
mod errors;
mod events;
mod interfaces;
mod storage;

pub use contract::*;
pub use distribution::{DistributionState, Side};
pub use errors::Error;

mod test;
