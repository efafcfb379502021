use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::POOL_SEED,
    custody::{verify_backing, Custodian, SplCustodian},
    engine::{self, DepositRequest},
    error::AmmError,
    events::LiquidityDeposited,
    state::Pool,
};

#[derive(Accounts)]
pub struct Deposit<'info> {
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

impl<'info> Deposit<'info> {
    pub fn deposit(&mut self, amount_a: u64, amount_b: u64) -> Result<()> {
        let settlement = engine::deposit(
            &mut self.pool,
            DepositRequest {
                caller: self.signer.key(),
                amount_a,
                amount_b,
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
        .settle(&settlement.transfers)?;

        verify_backing(&mut self.pool_ata_a, &mut self.pool_ata_b, &settlement.reserves)?;

        msg!(
            "deposit: a={} b={} reserves=({}, {})",
            amount_a,
            amount_b,
            settlement.reserves.reserve_a,
            settlement.reserves.reserve_b
        );

        emit!(LiquidityDeposited {
            pool: self.pool.key(),
            authority: self.signer.key(),
            amount_a,
            amount_b,
            reserve_a: settlement.reserves.reserve_a,
            reserve_b: settlement.reserves.reserve_b,
        });
        Ok(())
    }
}
