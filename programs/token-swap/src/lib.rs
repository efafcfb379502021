#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod auth;
pub mod constants;
pub mod custody;
pub mod engine;
pub mod error;
pub mod events;
pub mod pricing;
pub mod state;

pub mod context;
pub use context::*;

declare_id!("F7T2naGX3R3izoV96t84788Wru2foc8csf7AvcTwuCH4");

#[program]
pub mod token_swap {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, fee_rate_bps: u16) -> Result<()> {
        ctx.accounts.initialize(fee_rate_bps, ctx.bumps.pool)
    }

    pub fn deposit(ctx: Context<Deposit>, amount_a: u64, amount_b: u64) -> Result<()> {
        ctx.accounts.deposit(amount_a, amount_b)
    }

    pub fn swap(
        ctx: Context<Swap>,
        amount_in: u64,
        min_amount_out: u64,
        input_is_a: bool,
    ) -> Result<()> {
        ctx.accounts.swap(amount_in, min_amount_out, input_is_a)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount_a: u64, amount_b: u64) -> Result<()> {
        ctx.accounts.withdraw(amount_a, amount_b)
    }
}
