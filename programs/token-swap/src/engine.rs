//! Entry points for the four pool operations.
//!
//! Each call runs authorize -> validate -> price (swap only) -> slippage and
//! invariant floor -> ledger mutation -> transfer instructions. Every failing
//! step returns before the pool is written, so a rejected request leaves the
//! record exactly as it was. Callers must serialize requests per pool.

use anchor_lang::prelude::*;

use crate::{
    auth::{authorize, Operation},
    constants::MAX_FEE_RATE_BPS,
    custody::TransferInstruction,
    error::AmmError,
    pricing::{self, SwapQuote},
    state::{Pool, Reserves, TokenSide},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeRequest {
    pub caller: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub vault_a: Pubkey,
    pub vault_b: Pubkey,
    pub fee_rate_bps: u16,
    pub bump: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositRequest {
    pub caller: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRequest {
    pub caller: Pubkey,
    pub amount_in: u64,
    pub min_amount_out: u64,
    pub input_is_a: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawRequest {
    pub caller: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
}

/// Reserves after the operation and the transfers that back it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub reserves: Reserves,
    pub transfers: Vec<TransferInstruction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReceipt {
    pub quote: SwapQuote,
    pub settlement: Settlement,
}

pub fn initialize(pool: &mut Pool, request: InitializeRequest) -> Result<Settlement> {
    authorize(Operation::Initialize, &request.caller, pool)?;

    require!(!pool.initialized, AmmError::AlreadyInitialized);
    require!(request.fee_rate_bps <= MAX_FEE_RATE_BPS, AmmError::InvalidFeeRate);
    require_keys_neq!(request.mint_a, request.mint_b, AmmError::IdenticalMints);

    *pool = Pool {
        authority: request.caller,
        mint_a: request.mint_a,
        mint_b: request.mint_b,
        vault_a: request.vault_a,
        vault_b: request.vault_b,
        reserve_a: 0,
        reserve_b: 0,
        fee_rate_bps: request.fee_rate_bps,
        bump: request.bump,
        initialized: true,
    };

    Ok(Settlement {
        reserves: pool.reserves(),
        transfers: Vec::new(),
    })
}

pub fn deposit(pool: &mut Pool, request: DepositRequest) -> Result<Settlement> {
    pool.ensure_initialized()?;
    authorize(Operation::Deposit, &request.caller, pool)?;

    pool.apply_deposit(request.amount_a, request.amount_b)?;

    let transfers = legs(request.amount_a, request.amount_b)
        .map(|(side, amount)| TransferInstruction::inflow(pool, side, request.caller, amount))
        .collect();

    Ok(Settlement {
        reserves: pool.reserves(),
        transfers,
    })
}

pub fn swap(pool: &mut Pool, request: SwapRequest) -> Result<SwapReceipt> {
    pool.ensure_initialized()?;
    authorize(Operation::Swap, &request.caller, pool)?;

    require!(request.amount_in > 0, AmmError::ZeroAmount);
    let side_in = TokenSide::input(request.input_is_a);
    let side_out = side_in.opposite();
    let reserve_in = pool.reserve(side_in);
    let reserve_out = pool.reserve(side_out);
    require!(reserve_in > 0 && reserve_out > 0, AmmError::InsufficientLiquidity);

    let quote = pricing::quote(reserve_in, reserve_out, request.amount_in, pool.fee_rate_bps)?;
    require_gte!(quote.amount_out, request.min_amount_out, AmmError::SlippageExceeded);

    pool.apply_swap(quote.amount_in, quote.amount_out, request.input_is_a)?;

    let transfers = vec![
        TransferInstruction::inflow(pool, side_in, request.caller, quote.amount_in),
        TransferInstruction::outflow(pool, side_out, request.caller, quote.amount_out),
    ];

    Ok(SwapReceipt {
        quote,
        settlement: Settlement {
            reserves: pool.reserves(),
            transfers,
        },
    })
}

pub fn withdraw(pool: &mut Pool, request: WithdrawRequest) -> Result<Settlement> {
    pool.ensure_initialized()?;
    authorize(Operation::Withdraw, &request.caller, pool)?;

    pool.apply_withdraw(request.amount_a, request.amount_b)?;

    let transfers = legs(request.amount_a, request.amount_b)
        .map(|(side, amount)| TransferInstruction::outflow(pool, side, request.caller, amount))
        .collect();

    Ok(Settlement {
        reserves: pool.reserves(),
        transfers,
    })
}

/// Non-zero per-side amounts, A first.
fn legs(amount_a: u64, amount_b: u64) -> impl Iterator<Item = (TokenSide, u64)> {
    [(TokenSide::A, amount_a), (TokenSide::B, amount_b)]
        .into_iter()
        .filter(|(_, amount)| *amount > 0)
}
