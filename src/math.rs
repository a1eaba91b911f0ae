//! Fixed-point reward accounting for the staking pool
//!
//! Rewards are tracked with a single accumulator: the cumulative reward paid
//! per unit of stake, scaled by `PRECISION`. A distribution bumps the
//! accumulator once, and each account reconciles its own share lazily against
//! the snapshot (`reward_debt`) it took at its last settlement.
use odra::casper_types::U256;
use crate::staking::errors::PoolError;

/// Scale factor of the reward-per-stake accumulator (1e18)
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Safe math operations for U256
pub struct SafeMath;

impl SafeMath {
    /// Safe addition with overflow check
    pub fn add(a: U256, b: U256) -> Result<U256, PoolError> {
        a.checked_add(b).ok_or(PoolError::Overflow)
    }

    /// Safe subtraction with underflow check
    pub fn sub(a: U256, b: U256) -> Result<U256, PoolError> {
        a.checked_sub(b).ok_or(PoolError::Underflow)
    }

    /// Safe multiplication with overflow check
    pub fn mul(a: U256, b: U256) -> Result<U256, PoolError> {
        a.checked_mul(b).ok_or(PoolError::Overflow)
    }
}

/// Accumulator formulas. Both divisions floor, so every rounding error stays
/// in the pool's custody and never inflates a payout.
pub struct RewardMath;

impl RewardMath {
    /// Accumulator increase for distributing `amount` over `total_stake`:
    /// `amount * PRECISION / total_stake`
    pub fn rate_increment(amount: U256, total_stake: U256) -> Result<U256, PoolError> {
        if total_stake.is_zero() {
            return Err(PoolError::NoStakers);
        }
        let scaled = SafeMath::mul(amount, U256::from(PRECISION))?;
        Ok(scaled / total_stake)
    }

    /// Reward earned by `stake` since the account's snapshot:
    /// `stake * (acc_reward_per_stake - reward_debt) / PRECISION`
    pub fn accrued(
        stake: U256,
        acc_reward_per_stake: U256,
        reward_debt: U256,
    ) -> Result<U256, PoolError> {
        if stake.is_zero() {
            return Ok(U256::zero());
        }
        let delta = SafeMath::sub(acc_reward_per_stake, reward_debt)?;
        Ok(SafeMath::mul(stake, delta)? / U256::from(PRECISION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(result: Result<U256, PoolError>) -> U256 {
        match result {
            Ok(value) => value,
            Err(_) => panic!("unexpected math error"),
        }
    }

    fn tokens(n: u64) -> U256 {
        U256::from(n) * U256::from(PRECISION)
    }

    #[test]
    fn test_rate_increment_rejects_empty_pool() {
        assert!(matches!(
            RewardMath::rate_increment(tokens(10), U256::zero()),
            Err(PoolError::NoStakers)
        ));
    }

    #[test]
    fn test_rate_increment_floors() {
        // 890 over 294 staked: 3.027210884353741496598...
        let rate = ok(RewardMath::rate_increment(tokens(890), tokens(294)));
        assert_eq!(rate, U256::from(3_027_210_884_353_741_496u128));
    }

    #[test]
    fn test_accrued_uses_only_the_delta() {
        let acc = U256::from(5) * U256::from(PRECISION);
        let debt = U256::from(3) * U256::from(PRECISION);
        assert_eq!(ok(RewardMath::accrued(U256::from(100), acc, debt)), U256::from(200));
        assert_eq!(ok(RewardMath::accrued(U256::from(100), acc, acc)), U256::zero());
    }

    #[test]
    fn test_accrued_zero_stake() {
        let acc = U256::from(7) * U256::from(PRECISION);
        assert_eq!(ok(RewardMath::accrued(U256::zero(), acc, U256::zero())), U256::zero());
    }

    #[test]
    fn test_accrued_debt_above_accumulator() {
        let acc = U256::from(PRECISION);
        let debt = acc + U256::one();
        assert!(matches!(
            RewardMath::accrued(U256::from(1), acc, debt),
            Err(PoolError::Underflow)
        ));
    }

    #[test]
    fn test_rounding_never_pays_more_than_distributed() {
        // Three equal stakers, 100 base units distributed: 33 each, 1 left as dust
        let total = U256::from(3);
        let rate = ok(RewardMath::rate_increment(U256::from(100), total));
        let each = ok(RewardMath::accrued(U256::one(), rate, U256::zero()));
        assert_eq!(each, U256::from(33));
        assert!(each * U256::from(3) <= U256::from(100));
    }

    #[test]
    fn test_overflow_is_reported() {
        assert!(matches!(
            RewardMath::rate_increment(U256::MAX, U256::one()),
            Err(PoolError::Overflow)
        ));
        assert!(matches!(SafeMath::add(U256::MAX, U256::one()), Err(PoolError::Overflow)));
        assert!(matches!(SafeMath::sub(U256::zero(), U256::one()), Err(PoolError::Underflow)));
    }
}
