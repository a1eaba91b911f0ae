//! Custody ledger for the reward pool
//!
//! `PoolToken` is the CEP-18 token stakers deposit and rewards are paid in
//! for local deployments and tests. The pool itself only sees the
//! `Cep18Token` interface at the bottom of this file, so any CEP-18 contract
//! can stand in for it.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::events::{Transfer, Approval};
use crate::errors::TokenError;

/// Token held in custody by the pool; the deployer is the only minter
#[odra::module]
pub struct PoolToken {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Token decimals
    decimals: Var<u8>,
    /// Total supply of tokens
    total_supply: Var<U256>,
    /// Only address allowed to mint
    minter: Var<Address>,
    /// Balance mapping: owner -> balance
    balances: Mapping<Address, U256>,
    /// Allowance mapping: owner -> spender -> amount
    allowances: Mapping<(Address, Address), U256>,
}

#[odra::module]
impl PoolToken {
    /// Initialize the token; the deployer becomes the minter
    pub fn init(&mut self, name: String, symbol: String) {
        let caller = self.env().caller();
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(18);
        self.total_supply.set(U256::zero());
        self.minter.set(caller);
    }

    /// Get the token name
    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    /// Get the token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    /// Get the token decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    /// Get the total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    /// Get the balance of an address
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    /// Get the allowance for a spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    /// Pays out of the caller's balance; the pool uses this for principal
    /// and reward on unstake
    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.transfer_internal(caller, to, amount);
        true
    }

    /// Lets `spender` (normally the pool) pull up to `amount`
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.approve_internal(caller, spender, amount);
        true
    }

    /// Pulls `amount` from `from` against the caller's allowance; the pool
    /// uses this to take stakes and distributions into custody
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        let current_allowance = self.allowance(from, caller);

        if current_allowance < amount {
            self.env().revert(TokenError::InsufficientAllowance);
        }

        self.approve_internal(from, caller, current_allowance - amount);
        self.transfer_internal(from, to, amount);
        true
    }

    /// Mint new tokens; restricted to the deployer, reverts on supply overflow
    pub fn mint(&mut self, to: Address, amount: U256) {
        let caller = self.env().caller();
        let minter = self.minter.get_or_revert_with(TokenError::Unauthorized);
        if caller != minter {
            self.env().revert(TokenError::Unauthorized);
        }

        let new_supply = self.total_supply()
            .checked_add(amount)
            .unwrap_or_revert_with(&self.env(), TokenError::Overflow);
        self.total_supply.set(new_supply);

        // Every balance is bounded by the supply checked above
        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);

        self.env().emit_event(Transfer {
            from: Address::from(self.env().self_address()),
            to,
            value: amount,
        });
    }

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);

        self.env().emit_event(Transfer {
            from,
            to,
            value: amount,
        });
    }

    fn approve_internal(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);

        self.env().emit_event(Approval {
            owner,
            spender,
            value: amount,
        });
    }
}

/// The slice of CEP-18 the reward pool relies on for custody
#[odra::external_contract]
pub trait Cep18Token {
    /// Get the balance of an address
    fn balance_of(&self, owner: Address) -> U256;

    /// Transfer tokens out of the caller's balance
    fn transfer(&mut self, to: Address, amount: U256) -> bool;

    /// Transfer tokens from another address using the caller's allowance
    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;
}
