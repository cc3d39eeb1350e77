#![no_std]

mod contract;
mod errors;
mod events;
mod interfaces;
mod storage;

pub use contract::*;
pub use errors::Error;
