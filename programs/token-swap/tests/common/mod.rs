#![allow(dead_code)]

use std::collections::HashMap;

use anchor_lang::prelude::*;
use token_swap::{
    custody::{Custodian, Flow, TransferInstruction},
    engine::{
        self, DepositRequest, InitializeRequest, Settlement, SwapReceipt, SwapRequest,
        WithdrawRequest,
    },
    state::{Pool, TokenSide},
};

/// In-memory token ledger standing in for the SPL token program.
#[derive(Debug, Default)]
pub struct LedgerCustodian {
    pub vaults: HashMap<Pubkey, u64>,
    pub wallets: HashMap<(Pubkey, TokenSide), u64>,
}

impl LedgerCustodian {
    pub fn vault_balance(&self, vault: &Pubkey) -> u64 {
        self.vaults.get(vault).copied().unwrap_or_default()
    }

    pub fn wallet_balance(&self, owner: Pubkey, side: TokenSide) -> u64 {
        self.wallets.get(&(owner, side)).copied().unwrap_or_default()
    }

    pub fn mint(&mut self, owner: Pubkey, side: TokenSide, amount: u64) {
        *self.wallets.entry((owner, side)).or_default() += amount;
    }
}

impl Custodian for LedgerCustodian {
    fn execute(&mut self, instruction: &TransferInstruction) -> Result<()> {
        let vault = self
            .vaults
            .get_mut(&instruction.vault)
            .ok_or(ProgramError::UninitializedAccount)?;
        let wallet = self
            .wallets
            .entry((instruction.counterparty, instruction.side))
            .or_default();

        let (from, to) = match instruction.flow {
            Flow::Inflow => (wallet, vault),
            Flow::Outflow => (vault, wallet),
        };
        *from = from
            .checked_sub(instruction.amount)
            .ok_or(ProgramError::InsufficientFunds)?;
        *to = to
            .checked_add(instruction.amount)
            .ok_or(ProgramError::ArithmeticOverflow)?;
        Ok(())
    }
}

/// A pool plus the custodian that settles its transfers. Every successful
/// operation is followed by a check that reserves match vault balances.
pub struct Harness {
    pub pool: Pool,
    pub custodian: LedgerCustodian,
    pub authority: Pubkey,
}

impl Harness {
    pub fn new(fee_rate_bps: u16) -> Self {
        let authority = Pubkey::new_unique();
        let vault_a = Pubkey::new_unique();
        let vault_b = Pubkey::new_unique();

        let mut pool = Pool::default();
        engine::initialize(
            &mut pool,
            InitializeRequest {
                caller: authority,
                mint_a: Pubkey::new_unique(),
                mint_b: Pubkey::new_unique(),
                vault_a,
                vault_b,
                fee_rate_bps,
                bump: 255,
            },
        )
        .unwrap();

        let mut custodian = LedgerCustodian::default();
        custodian.vaults.insert(vault_a, 0);
        custodian.vaults.insert(vault_b, 0);

        Self { pool, custodian, authority }
    }

    /// Harness whose authority already deposited `(reserve_a, reserve_b)`.
    pub fn seeded(fee_rate_bps: u16, reserve_a: u64, reserve_b: u64) -> Self {
        let mut harness = Self::new(fee_rate_bps);
        let authority = harness.authority;
        harness.custodian.mint(authority, TokenSide::A, reserve_a);
        harness.custodian.mint(authority, TokenSide::B, reserve_b);
        if reserve_a > 0 || reserve_b > 0 {
            harness.deposit(authority, reserve_a, reserve_b).unwrap();
        }
        harness
    }

    pub fn deposit(&mut self, caller: Pubkey, amount_a: u64, amount_b: u64) -> Result<Settlement> {
        let settlement = engine::deposit(
            &mut self.pool,
            DepositRequest {
                caller,
                amount_a,
                amount_b,
            },
        )?;
        self.settle(&settlement)?;
        Ok(settlement)
    }

    pub fn swap(
        &mut self,
        caller: Pubkey,
        amount_in: u64,
        min_amount_out: u64,
        input_is_a: bool,
    ) -> Result<SwapReceipt> {
        let receipt = engine::swap(
            &mut self.pool,
            SwapRequest { caller, amount_in, min_amount_out, input_is_a },
        )?;
        self.settle(&receipt.settlement)?;
        Ok(receipt)
    }

    pub fn withdraw(&mut self, caller: Pubkey, amount_a: u64, amount_b: u64) -> Result<Settlement> {
        let settlement = engine::withdraw(
            &mut self.pool,
            WithdrawRequest {
                caller,
                amount_a,
                amount_b,
            },
        )?;
        self.settle(&settlement)?;
        Ok(settlement)
    }

    fn settle(&mut self, settlement: &Settlement) -> Result<()> {
        self.custodian.settle(&settlement.transfers)?;
        assert_eq!(settlement.reserves, self.pool.reserves());
        self.assert_backed();
        Ok(())
    }

    pub fn assert_backed(&self) {
        assert_eq!(self.custodian.vault_balance(&self.pool.vault_a), self.pool.reserve_a);
        assert_eq!(self.custodian.vault_balance(&self.pool.vault_b), self.pool.reserve_b);
    }
}

pub fn assert_rejected<T: std::fmt::Debug>(
    result: Result<T>,
    expected: token_swap::error::AmmError,
) {
    assert_eq!(result.unwrap_err(), anchor_lang::error::Error::from(expected));
}
