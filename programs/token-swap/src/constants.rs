use anchor_lang::prelude::*;

#[constant]
pub const POOL_SEED: &[u8] = b"pool";

/// 100% expressed in basis points.
#[constant]
pub const BPS_DENOMINATOR: u16 = 10_000;

#[constant]
pub const MAX_FEE_RATE_BPS: u16 = 10_000;
