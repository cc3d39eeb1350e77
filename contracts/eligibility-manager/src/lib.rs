#![no_std]

mod constants;
mod contract;
mod errors;
mod events;
mod helpers;
mod interfaces;
mod storage;

pub use contract::*;
pub use errors::Error;
pub use storage::EligibilitySnapshot;

mod test;
