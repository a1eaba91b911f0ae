//! Error definitions for the ledger token
use odra::prelude::*;

/// Custom errors for the CEP-18 ledger token
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 100,
    
    /// Insufficient balance for operation
    InsufficientBalance = 101,

    /// Caller is not allowed to mint
    Unauthorized = 102,

    /// Mint would overflow the supply
    Overflow = 103,
}
