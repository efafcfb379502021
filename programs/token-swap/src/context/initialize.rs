use anchor_lang::prelude::*;
use anchor_spl::{associated_token::AssociatedToken, token::{Mint, Token, TokenAccount}};

use crate::{
    constants::POOL_SEED,
    engine::{self, InitializeRequest},
    error::AmmError,
    events::PoolInitialized,
    state::Pool,
};

#[derive(Accounts)]
#[instruction(fee_rate_bps: u16)]
pub struct Initialize<'info> {
    #[account(mut)]
    signer: Signer<'info>,
    mint_a: Account<'info, Mint>,
    #[account(constraint = mint_b.key() != mint_a.key() @ AmmError::IdenticalMints)]
    mint_b: Account<'info, Mint>,
    #[account(
        init_if_needed,
        payer = signer,
        associated_token::authority = pool,
        associated_token::mint = mint_a
    )]
    pool_ata_a: Account<'info, TokenAccount>,
    #[account(
        init_if_needed,
        payer = signer,
        associated_token::authority = pool,
        associated_token::mint = mint_b
    )]
    pool_ata_b: Account<'info, TokenAccount>,
    #[account(
        init_if_needed,
        payer = signer,
        space = Pool::DISCRIMINATOR.len() + Pool::INIT_SPACE,
        seeds = [POOL_SEED, mint_a.key().as_ref(), mint_b.key().as_ref(), fee_rate_bps.to_le_bytes().as_ref()],
        bump
    )]
    pool: Account<'info, Pool>,
    token_program: Program<'info, Token>,
    associated_token_program: Program<'info, AssociatedToken>,
    system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(&mut self, fee_rate_bps: u16, bump: u8) -> Result<()> {
        engine::initialize(
            &mut self.pool,
            InitializeRequest {
                caller: self.signer.key(),
                mint_a: self.mint_a.key(),
                mint_b: self.mint_b.key(),
                vault_a: self.pool_ata_a.key(),
                vault_b: self.pool_ata_b.key(),
                fee_rate_bps,
                bump,
            },
        )?;

        msg!("pool initialized: fee {} bps, authority {}", fee_rate_bps, self.signer.key());

        emit!(PoolInitialized {
            pool: self.pool.key(),
            authority: self.pool.authority,
            mint_a: self.pool.mint_a,
            mint_b: self.pool.mint_b,
            fee_rate_bps,
        });
        Ok(())
    }
}
