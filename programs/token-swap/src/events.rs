use anchor_lang::prelude::*;

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub fee_rate_bps: u16,
}

#[event]
pub struct LiquidityDeposited {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
    pub reserve_a: u64,
    pub reserve_b: u64,
}

#[event]
pub struct Swapped {
    pub pool: Pubkey,
    pub trader: Pubkey,
    pub input_is_a: bool,
    pub amount_in: u64,
    pub fee_amount: u64,
    pub amount_out: u64,
    pub reserve_a: u64,
    pub reserve_b: u64,
}

#[event]
pub struct LiquidityWithdrawn {
    pub pool: Pubkey,
    pub authority: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
    pub reserve_a: u64,
    pub reserve_b: u64,
}
