#![no_std]

mod accounting;
mod constants;
mod contract;
mod errors;
mod events;
mod helpers;
mod hooks;
mod interfaces;
mod ledger;
mod storage;

pub use contract::*;
pub use errors::Error;
pub use hooks::{LendingHookSink, LendingHookSinkClient};
pub use ledger::Side;
