use anchor_lang::prelude::*;

use crate::{error::AmmError, pricing::constant_product};

#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct Pool {
    pub authority: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub vault_a: Pubkey,
    pub vault_b: Pubkey,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub fee_rate_bps: u16,
    pub bump: u8,
    pub initialized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenSide {
    A,
    B,
}

impl TokenSide {
    /// Side paid into the pool by a swap.
    pub fn input(input_is_a: bool) -> Self {
        if input_is_a {
            TokenSide::A
        } else {
            TokenSide::B
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            TokenSide::A => TokenSide::B,
            TokenSide::B => TokenSide::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reserves {
    pub reserve_a: u64,
    pub reserve_b: u64,
}

impl Reserves {
    pub fn product(&self) -> u128 {
        constant_product(self.reserve_a, self.reserve_b)
    }
}

impl Pool {
    pub fn ensure_initialized(&self) -> Result<()> {
        require!(self.initialized, AmmError::NotInitialized);
        Ok(())
    }

    pub fn reserves(&self) -> Reserves {
        Reserves {
            reserve_a: self.reserve_a,
            reserve_b: self.reserve_b,
        }
    }

    pub fn reserve(&self, side: TokenSide) -> u64 {
        match side {
            TokenSide::A => self.reserve_a,
            TokenSide::B => self.reserve_b,
        }
    }

    pub fn vault(&self, side: TokenSide) -> Pubkey {
        match side {
            TokenSide::A => self.vault_a,
            TokenSide::B => self.vault_b,
        }
    }

    /// Adds liquidity to both sides. One side may be zero.
    pub fn apply_deposit(&mut self, amount_a: u64, amount_b: u64) -> Result<()> {
        require!(amount_a > 0 || amount_b > 0, AmmError::ZeroAmount);

        let reserve_a = self
            .reserve_a
            .checked_add(amount_a)
            .ok_or(AmmError::ArithmeticOverflow)?;
        let reserve_b = self
            .reserve_b
            .checked_add(amount_b)
            .ok_or(AmmError::ArithmeticOverflow)?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        Ok(())
    }

    pub fn apply_withdraw(&mut self, amount_a: u64, amount_b: u64) -> Result<()> {
        let reserve_a = self
            .reserve_a
            .checked_sub(amount_a)
            .ok_or(AmmError::InsufficientLiquidity)?;
        let reserve_b = self
            .reserve_b
            .checked_sub(amount_b)
            .ok_or(AmmError::InsufficientLiquidity)?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        Ok(())
    }

    /// Books a priced swap. The whole `amount_in`, fee included, stays in the
    /// input reserve. Re-checks `k` on its own so a bad quote can never be
    /// written.
    pub fn apply_swap(&mut self, amount_in: u64, amount_out: u64, input_is_a: bool) -> Result<()> {
        require!(amount_in > 0, AmmError::ZeroAmount);

        let k_before = constant_product(self.reserve_a, self.reserve_b);
        let side_in = TokenSide::input(input_is_a);

        let reserve_in = self
            .reserve(side_in)
            .checked_add(amount_in)
            .ok_or(AmmError::ArithmeticOverflow)?;
        let reserve_out = self
            .reserve(side_in.opposite())
            .checked_sub(amount_out)
            .ok_or(AmmError::InsufficientLiquidity)?;
        require!(reserve_out > 0, AmmError::InsufficientLiquidity);

        let (reserve_a, reserve_b) = match side_in {
            TokenSide::A => (reserve_in, reserve_out),
            TokenSide::B => (reserve_out, reserve_in),
        };
        require!(
            constant_product(reserve_a, reserve_b) >= k_before,
            AmmError::InvariantViolation
        );

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(reserve_a: u64, reserve_b: u64) -> Pool {
        Pool {
            reserve_a,
            reserve_b,
            fee_rate_bps: 30,
            initialized: true,
            ..Pool::default()
        }
    }

    #[test]
    fn one_sided_deposit() {
        let mut p = pool(10, 20);
        p.apply_deposit(0, 5).unwrap();
        assert_eq!(p.reserves(), Reserves { reserve_a: 10, reserve_b: 25 });
    }

    #[test]
    fn empty_deposit_is_rejected() {
        let mut p = pool(10, 20);
        let err = p.apply_deposit(0, 0).unwrap_err();
        assert_eq!(err, AmmError::ZeroAmount.into());
    }

    #[test]
    fn deposit_overflow_leaves_both_sides_untouched() {
        let mut p = pool(1, u64::MAX);
        let err = p.apply_deposit(5, 1).unwrap_err();
        assert_eq!(err, AmmError::ArithmeticOverflow.into());
        assert_eq!(p, pool(1, u64::MAX));
    }

    #[test]
    fn withdraw_more_than_reserve() {
        let mut p = pool(100, 100);
        let err = p.apply_withdraw(50, 101).unwrap_err();
        assert_eq!(err, AmmError::InsufficientLiquidity.into());
        assert_eq!(p, pool(100, 100));
    }

    #[test]
    fn withdraw_can_drain() {
        let mut p = pool(100, 100);
        p.apply_withdraw(100, 100).unwrap();
        assert_eq!(p.reserves(), Reserves::default());
    }

    #[test]
    fn swap_b_for_a() {
        let mut p = pool(1_000, 1_000);
        p.apply_swap(100, 90, false).unwrap();
        assert_eq!(p.reserves(), Reserves { reserve_a: 910, reserve_b: 1_100 });
    }

    #[test]
    fn swap_cannot_empty_output_side() {
        let mut p = pool(1_000, 1_000);
        let err = p.apply_swap(1_000_000, 1_000, true).unwrap_err();
        assert_eq!(err, AmmError::InsufficientLiquidity.into());
        assert_eq!(p, pool(1_000, 1_000));
    }

    #[test]
    fn swap_that_shrinks_k_is_rejected() {
        let mut p = pool(1_000, 1_000);
        // 1100 * 900 = 990_000 < 1_000_000
        let err = p.apply_swap(100, 100, true).unwrap_err();
        assert_eq!(err, AmmError::InvariantViolation.into());
        assert_eq!(p, pool(1_000, 1_000));
    }

    #[test]
    fn zero_input_swap() {
        let mut p = pool(1_000, 1_000);
        let err = p.apply_swap(0, 0, true).unwrap_err();
        assert_eq!(err, AmmError::ZeroAmount.into());
    }

    #[test]
    fn swap_input_overflow() {
        let mut p = pool(u64::MAX - 1, 1_000);
        let err = p.apply_swap(2, 1, true).unwrap_err();
        assert_eq!(err, AmmError::ArithmeticOverflow.into());
        assert_eq!(p, pool(u64::MAX - 1, 1_000));
    }
}
