use anchor_lang::prelude::*;
use anchor_spl::token::{transfer, Token, TokenAccount, Transfer};

use crate::{
    constants::POOL_SEED,
    error::AmmError,
    state::{Pool, Reserves, TokenSide},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Counterparty account -> vault, signed by the counterparty.
    Inflow,
    /// Vault -> counterparty account, signed by the pool PDA.
    Outflow,
}

/// A token movement the pool asks its custodian to perform once every check
/// has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferInstruction {
    pub side: TokenSide,
    pub flow: Flow,
    pub vault: Pubkey,
    /// Owner of the non-vault end of the transfer.
    pub counterparty: Pubkey,
    pub amount: u64,
}

impl TransferInstruction {
    pub fn inflow(pool: &Pool, side: TokenSide, counterparty: Pubkey, amount: u64) -> Self {
        Self {
            side,
            flow: Flow::Inflow,
            vault: pool.vault(side),
            counterparty,
            amount,
        }
    }

    pub fn outflow(pool: &Pool, side: TokenSide, counterparty: Pubkey, amount: u64) -> Self {
        Self {
            side,
            flow: Flow::Outflow,
            vault: pool.vault(side),
            counterparty,
            amount,
        }
    }
}

pub trait Custodian {
    fn execute(&mut self, instruction: &TransferInstruction) -> Result<()>;

    fn settle(&mut self, instructions: &[TransferInstruction]) -> Result<()> {
        for instruction in instructions {
            self.execute(instruction)?;
        }
        Ok(())
    }
}

/// Custodian backed by the SPL token program. Vaults are token accounts owned
/// by the pool PDA; the counterparty signs the instruction being processed.
pub struct SplCustodian<'a, 'info> {
    pub token_program: &'a Program<'info, Token>,
    pub pool: &'a Account<'info, Pool>,
    pub vault_a: &'a Account<'info, TokenAccount>,
    pub vault_b: &'a Account<'info, TokenAccount>,
    pub counterparty: &'a Signer<'info>,
    pub counterparty_a: &'a Account<'info, TokenAccount>,
    pub counterparty_b: &'a Account<'info, TokenAccount>,
}

impl<'a, 'info> Custodian for SplCustodian<'a, 'info> {
    fn execute(&mut self, instruction: &TransferInstruction) -> Result<()> {
        let (vault, account) = match instruction.side {
            TokenSide::A => (self.vault_a, self.counterparty_a),
            TokenSide::B => (self.vault_b, self.counterparty_b),
        };
        check_route(instruction, &vault.key(), &self.counterparty.key())?;

        match instruction.flow {
            Flow::Inflow => {
                let accounts = Transfer {
                    from: account.to_account_info(),
                    to: vault.to_account_info(),
                    authority: self.counterparty.to_account_info(),
                };

                let ctx = CpiContext::new(self.token_program.to_account_info(), accounts);

                transfer(ctx, instruction.amount)
            }
            Flow::Outflow => {
                let fee = self.pool.fee_rate_bps.to_le_bytes();
                let bump = [self.pool.bump];
                let seeds = pool_signer_seeds(self.pool, &fee, &bump);
                let signer_seeds: [&[&[u8]]; 1] = [&seeds];

                let accounts = Transfer {
                    from: vault.to_account_info(),
                    to: account.to_account_info(),
                    authority: self.pool.to_account_info(),
                };

                let ctx = CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    accounts,
                    &signer_seeds,
                );

                transfer(ctx, instruction.amount)
            }
        }
    }
}

/// Seeds the pool PDA signs vault outflows with.
pub fn pool_signer_seeds<'a>(
    pool: &'a Pool,
    fee: &'a [u8; 2],
    bump: &'a [u8; 1],
) -> [&'a [u8]; 5] {
    [POOL_SEED, pool.mint_a.as_ref(), pool.mint_b.as_ref(), fee, bump]
}

/// The accounts handed to the custodian must be the ones the instruction names.
pub fn check_route(
    instruction: &TransferInstruction,
    vault: &Pubkey,
    counterparty: &Pubkey,
) -> Result<()> {
    require_keys_eq!(*vault, instruction.vault, AmmError::InvalidVault);
    require_keys_eq!(*counterparty, instruction.counterparty, AmmError::Unauthorized);
    Ok(())
}

/// Vaults must hold at least what the pool has booked. Anything above the
/// reserve was sent in from outside and is not priced.
pub fn check_backing(balance_a: u64, balance_b: u64, reserves: &Reserves) -> Result<()> {
    require_gte!(balance_a, reserves.reserve_a, AmmError::ReserveMismatch);
    require_gte!(balance_b, reserves.reserve_b, AmmError::ReserveMismatch);
    Ok(())
}

pub fn verify_backing<'info>(
    vault_a: &mut Account<'info, TokenAccount>,
    vault_b: &mut Account<'info, TokenAccount>,
    reserves: &Reserves,
) -> Result<()> {
    vault_a.reload()?;
    vault_b.reload()?;

    check_backing(vault_a.amount, vault_b.amount, reserves)
}
