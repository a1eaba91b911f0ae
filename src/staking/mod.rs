//! Proportional reward pool
//! 
//! Stakers deposit a CEP-18 token; reward injected with `distribute` is
//! shared by stake weight among everyone staked at that moment and paid out
//! together with principal on `unstake`.

pub mod reward_pool;
pub mod errors;
pub mod events;


pub use reward_pool::{RewardPool, StakeAccount};
pub use errors::PoolError;
pub use events::*;
