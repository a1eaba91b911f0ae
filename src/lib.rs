#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

// Ledger token
pub mod token;
pub mod errors;
pub mod events;

// Reward accounting
pub mod math;

// Reward pool
pub mod staking;
