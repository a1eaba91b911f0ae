//! Events for the reward pool

use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when tokens are staked
#[odra::event]
pub struct Stake {
    pub account: Address,
    pub amount: U256,
}

/// Event emitted when stake is withdrawn together with its accrued reward
#[odra::event]
pub struct UnStake {
    pub account: Address,
    pub reward_paid: U256,
    pub amount_unstaked: U256,
}

/// Event emitted when a reward is injected into the pool
#[odra::event]
pub struct Distribute {
    pub amount: U256,
}
