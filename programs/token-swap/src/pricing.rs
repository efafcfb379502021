use anchor_lang::prelude::*;

use crate::{
    constants::{BPS_DENOMINATOR, MAX_FEE_RATE_BPS},
    error::AmmError,
};

/// Breakdown of a priced swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    pub amount_in: u64,
    /// Part of `amount_in` withheld as fee. It still lands in the input reserve.
    pub fee_amount: u64,
    pub amount_out: u64,
}

/// `k = reserve_a * reserve_b`. Two u64 factors always fit in u128.
pub fn constant_product(reserve_a: u64, reserve_b: u64) -> u128 {
    (reserve_a as u128) * (reserve_b as u128)
}

/// Input left after the fee is taken, truncated toward zero.
pub fn effective_input(amount_in: u64, fee_rate_bps: u16) -> Result<u64> {
    require!(fee_rate_bps <= MAX_FEE_RATE_BPS, AmmError::InvalidFeeRate);

    let effective = (amount_in as u128)
        .checked_mul((BPS_DENOMINATOR - fee_rate_bps) as u128)
        .ok_or(AmmError::ArithmeticOverflow)?
        .checked_div(BPS_DENOMINATOR as u128)
        .ok_or(AmmError::ArithmeticOverflow)?;

    u64::try_from(effective).map_err(|_| error!(AmmError::ArithmeticOverflow))
}

/// Output of selling `amount_in` into a pool holding `reserve_in`/`reserve_out`.
///
/// ```text
/// dx' = dx * (10000 - fee) / 10000
/// dy  = y * dx' / (x + dx')
/// ```
///
/// Both divisions floor, so every rounding step leaves dust in the pool and
/// `(x + dx) * (y - dy) >= x * y` holds for any fee rate.
pub fn quote_swap(
    reserve_in: u64,
    reserve_out: u64,
    amount_in: u64,
    fee_rate_bps: u16,
) -> Result<u64> {
    Ok(quote(reserve_in, reserve_out, amount_in, fee_rate_bps)?.amount_out)
}

pub fn quote(
    reserve_in: u64,
    reserve_out: u64,
    amount_in: u64,
    fee_rate_bps: u16,
) -> Result<SwapQuote> {
    require!(reserve_in > 0 && reserve_out > 0, AmmError::InsufficientLiquidity);

    let effective_in = effective_input(amount_in, fee_rate_bps)?;

    let numerator = (reserve_out as u128)
        .checked_mul(effective_in as u128)
        .ok_or(AmmError::ArithmeticOverflow)?;
    let denominator = (reserve_in as u128)
        .checked_add(effective_in as u128)
        .ok_or(AmmError::ArithmeticOverflow)?;
    let amount_out: u64 = numerator
        .checked_div(denominator)
        .ok_or(AmmError::ArithmeticOverflow)?
        .try_into()
        .map_err(|_| error!(AmmError::ArithmeticOverflow))?;

    require!(
        amount_out > 0 && amount_out < reserve_out,
        AmmError::InsufficientLiquidity
    );

    Ok(SwapQuote {
        amount_in,
        fee_amount: amount_in - effective_in,
        amount_out,
    })
}
