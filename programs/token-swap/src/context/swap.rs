use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::POOL_SEED,
    custody::{verify_backing, Custodian, SplCustodian},
    engine::{self, SwapRequest},
    error::AmmError,
    events::Swapped,
    state::Pool,
};

#[derive(Accounts)]
pub struct Swap<'info> {
    signer: Signer<'info>,
    #[account(address = pool.mint_a)]
    mint_a: Account<'info, Mint>,
    #[account(address = pool.mint_b)]
    mint_b: Account<'info, Mint>,
    #[account(
        mut,
        associated_token::authority = signer,
        associated_token::mint = mint_a
    )]
    signer_ata_a: Account<'info, TokenAccount>,
    #[account(
        mut,
        associated_token::authority = signer,
        associated_token::mint = mint_b
    )]
    signer_ata_b: Account<'info, TokenAccount>,
    #[account(mut, address = pool.vault_a @ AmmError::InvalidVault)]
    pool_ata_a: Account<'info, TokenAccount>,
    #[account(mut, address = pool.vault_b @ AmmError::InvalidVault)]
    pool_ata_b: Account<'info, TokenAccount>,
    #[account(
        mut,
        seeds = [POOL_SEED, mint_a.key().as_ref(), mint_b.key().as_ref(), pool.fee_rate_bps.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pool: Account<'info, Pool>,
    token_program: Program<'info, Token>,
}

impl<'info> Swap<'info> {
    pub fn swap(&mut self, amount_in: u64, min_amount_out: u64, input_is_a: bool) -> Result<()> {
        let receipt = engine::swap(
            &mut self.pool,
            SwapRequest {
                caller: self.signer.key(),
                amount_in,
                min_amount_out,
                input_is_a,
            },
        )?;

        SplCustodian {
            token_program: &self.token_program,
            pool: &self.pool,
            vault_a: &self.pool_ata_a,
            vault_b: &self.pool_ata_b,
            counterparty: &self.signer,
            counterparty_a: &self.signer_ata_a,
            counterparty_b: &self.signer_ata_b,
        }
        .settle(&receipt.settlement.transfers)?;

        let reserves = receipt.settlement.reserves;
        verify_backing(&mut self.pool_ata_a, &mut self.pool_ata_b, &reserves)?;

        msg!(
            "swap: in={} fee={} out={} a_to_b={}",
            receipt.quote.amount_in,
            receipt.quote.fee_amount,
            receipt.quote.amount_out,
            input_is_a
        );

        emit!(Swapped {
            pool: self.pool.key(),
            trader: self.signer.key(),
            input_is_a,
            amount_in: receipt.quote.amount_in,
            fee_amount: receipt.quote.fee_amount,
            amount_out: receipt.quote.amount_out,
            reserve_a: reserves.reserve_a,
            reserve_b: reserves.reserve_b,
        });
        Ok(())
    }
}
