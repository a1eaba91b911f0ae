//! Error types for the reward pool

use odra::prelude::*;

#[odra::odra_error]
pub enum PoolError {
    /// Zero amount supplied
    InvalidAmount = 1,
    /// Caller has no stake, or less than requested
    ZeroStake = 2,
    /// Distribution into a pool with nothing staked
    NoStakers = 3,
    /// Ledger reported a failed transfer
    TransferFailed = 4,
    /// Arithmetic overflow
    Overflow = 5,
    /// Arithmetic underflow
    Underflow = 6,
    /// Reentrant call
    Locked = 7,
}
