#![no_std]

mod contract;
mod errors;
mod events;
mod interfaces;
pub mod rewards;
mod storage;

pub use contract::*;
pub use errors::Error;
