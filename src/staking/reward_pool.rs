//! Reward Pool - Stake a token, share injected rewards by stake weight
//!
//! Each `distribute` adds `amount * PRECISION / total_stake` to a global
//! reward-per-stake accumulator. Accounts keep a snapshot of the accumulator
//! (`reward_debt`) and settle the difference against their stake when they
//! next interact, so every call is O(1) regardless of the number of stakers.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::errors::PoolError;
use super::events::*;
use crate::math::{RewardMath, SafeMath};
use crate::token::Cep18TokenContractRef;

/// Per-staker accounting
#[odra::odra_type]
pub struct StakeAccount {
    /// Principal currently staked
    pub stake: U256,
    /// Accumulator value at the last settlement
    pub reward_debt: U256,
    /// Reward settled by a top-up stake, not yet paid out
    pub pending_reward: U256,
}

impl StakeAccount {
    fn empty() -> Self {
        StakeAccount {
            stake: U256::zero(),
            reward_debt: U256::zero(),
            pending_reward: U256::zero(),
        }
    }

    /// Everything owed to this account as of `acc_reward_per_stake`
    fn claimable(&self, acc_reward_per_stake: U256) -> Result<U256, PoolError> {
        let accrued = RewardMath::accrued(self.stake, acc_reward_per_stake, self.reward_debt)?;
        SafeMath::add(self.pending_reward, accrued)
    }

    /// Folds accrued reward into `pending_reward` and re-baselines the snapshot
    fn settle(&mut self, acc_reward_per_stake: U256) -> Result<(), PoolError> {
        self.pending_reward = self.claimable(acc_reward_per_stake)?;
        self.reward_debt = acc_reward_per_stake;
        Ok(())
    }
}

/// Reward Pool contract
#[odra::module]
pub struct RewardPool {
    /// Custody ledger token (staked and rewarded)
    token: Var<Address>,
    /// Sum of every account's stake
    total_stake: Var<U256>,
    /// Cumulative reward per unit of stake, scaled by PRECISION
    acc_reward_per_stake: Var<U256>,
    /// Stakers
    accounts: Mapping<Address, StakeAccount>,
    /// Number of accounts with non-zero stake
    staker_count: Var<u32>,
    /// Sum of all distributed rewards
    total_distributed: Var<U256>,
    /// Sum of reward components paid by unstake
    total_rewards_paid: Var<U256>,
    /// Reentrancy lock
    locked: Var<bool>,
}

#[odra::module]
impl RewardPool {
    /// Initialize the pool over a CEP-18 ledger
    pub fn init(&mut self, token: Address) {
        self.token.set(token);
        self.total_stake.set(U256::zero());
        self.acc_reward_per_stake.set(U256::zero());
        self.staker_count.set(0);
        self.total_distributed.set(U256::zero());
        self.total_rewards_paid.set(U256::zero());
        self.locked.set(false);
    }

    // ========================================
    // Mutations
    // ========================================

    /// Stake `amount` of the ledger token. The caller must have approved the
    /// pool for at least `amount`.
    pub fn stake(&mut self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(PoolError::InvalidAmount);
        }
        self.lock();

        let caller = self.env().caller();
        let acc = self.acc_reward_per_stake.get_or_default();
        let mut account = self.accounts.get(&caller).unwrap_or(StakeAccount::empty());
        account.settle(acc).unwrap_or_revert(&self.env());

        self.pull(caller, amount);

        let was_empty = account.stake.is_zero();
        account.stake = SafeMath::add(account.stake, amount).unwrap_or_revert(&self.env());
        self.accounts.set(&caller, account);

        let total = SafeMath::add(self.total_stake(), amount).unwrap_or_revert(&self.env());
        self.total_stake.set(total);
        if was_empty {
            self.staker_count.set(self.staker_count() + 1);
        }

        self.env().emit_event(Stake {
            account: caller,
            amount,
        });
        self.unlock();
    }

    /// Withdraw `amount` of stake. The reward paid alongside covers the whole
    /// stake held before this call; later accrual runs on what remains.
    pub fn unstake(&mut self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(PoolError::InvalidAmount);
        }
        self.lock();

        let caller = self.env().caller();
        let mut account = self.staked_account(caller, amount);
        let acc = self.acc_reward_per_stake.get_or_default();
        let reward = account.claimable(acc).unwrap_or_revert(&self.env());

        account.stake = SafeMath::sub(account.stake, amount).unwrap_or_revert(&self.env());
        account.reward_debt = acc;
        account.pending_reward = U256::zero();
        let now_empty = account.stake.is_zero();
        self.accounts.set(&caller, account);

        let total = SafeMath::sub(self.total_stake(), amount).unwrap_or_revert(&self.env());
        self.total_stake.set(total);
        if now_empty {
            self.staker_count.set(self.staker_count().saturating_sub(1));
        }
        let paid = SafeMath::add(self.total_rewards_paid(), reward).unwrap_or_revert(&self.env());
        self.total_rewards_paid.set(paid);

        let payout = SafeMath::add(amount, reward).unwrap_or_revert(&self.env());
        self.push(caller, payout);

        self.env().emit_event(UnStake {
            account: caller,
            reward_paid: reward,
            amount_unstaked: amount,
        });
        self.unlock();
    }

    /// Inject `amount` of reward, shared by everyone currently staked in
    /// proportion to their stake.
    pub fn distribute(&mut self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(PoolError::InvalidAmount);
        }
        self.lock();

        let increment = RewardMath::rate_increment(amount, self.total_stake())
            .unwrap_or_revert(&self.env());

        let caller = self.env().caller();
        self.pull(caller, amount);

        let acc = SafeMath::add(self.reward_per_stake(), increment).unwrap_or_revert(&self.env());
        self.acc_reward_per_stake.set(acc);
        let distributed = SafeMath::add(self.total_distributed(), amount)
            .unwrap_or_revert(&self.env());
        self.total_distributed.set(distributed);

        self.env().emit_event(Distribute { amount });
        self.unlock();
    }

    // ========================================
    // View Functions
    // ========================================

    pub fn get_stake(&self, account: Address) -> U256 {
        self.accounts
            .get(&account)
            .map(|a| a.stake)
            .unwrap_or_default()
    }

    /// Reward `unstake(amount)` would pay `account` right now. Rejects the
    /// same arguments `unstake` rejects.
    pub fn get_reward(&self, account: Address, amount: U256) -> U256 {
        if amount.is_zero() {
            self.env().revert(PoolError::InvalidAmount);
        }
        let stake_account = self.staked_account(account, amount);
        stake_account
            .claimable(self.reward_per_stake())
            .unwrap_or_revert(&self.env())
    }

    pub fn total_stake(&self) -> U256 {
        self.total_stake.get_or_default()
    }

    pub fn token(&self) -> Address {
        self.token.get().unwrap_or_revert(&self.env())
    }

    pub fn reward_per_stake(&self) -> U256 {
        self.acc_reward_per_stake.get_or_default()
    }

    pub fn get_account(&self, account: Address) -> Option<StakeAccount> {
        self.accounts.get(&account)
    }

    pub fn staker_count(&self) -> u32 {
        self.staker_count.get_or_default()
    }

    pub fn total_distributed(&self) -> U256 {
        self.total_distributed.get_or_default()
    }

    pub fn total_rewards_paid(&self) -> U256 {
        self.total_rewards_paid.get_or_default()
    }

    // ========================================
    // Internal Functions
    // ========================================

    /// Account holding at least `amount`, or revert with `ZeroStake`
    fn staked_account(&self, owner: Address, amount: U256) -> StakeAccount {
        let account = self.accounts
            .get(&owner)
            .unwrap_or_revert_with(&self.env(), PoolError::ZeroStake);
        if account.stake.is_zero() || account.stake < amount {
            self.env().revert(PoolError::ZeroStake);
        }
        account
    }

    /// Move `amount` from `from` into pool custody
    fn pull(&mut self, from: Address, amount: U256) {
        let pool = Address::from(self.env().self_address());
        let mut token = Cep18TokenContractRef::new(self.env(), self.token());
        if !token.transfer_from(from, pool, amount) {
            self.env().revert(PoolError::TransferFailed);
        }
    }

    /// Move `amount` out of pool custody to `to`
    fn push(&mut self, to: Address, amount: U256) {
        let mut token = Cep18TokenContractRef::new(self.env(), self.token());
        if !token.transfer(to, amount) {
            self.env().revert(PoolError::TransferFailed);
        }
    }

    fn lock(&mut self) {
        if self.locked.get_or_default() {
            self.env().revert(PoolError::Locked);
        }
        self.locked.set(true);
    }

    fn unlock(&mut self) {
        self.locked.set(false);
    }
}
