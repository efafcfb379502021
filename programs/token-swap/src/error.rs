use anchor_lang::prelude::*;

#[error_code]
pub enum AmmError {
    #[msg("Caller is not the pool authority")]
    Unauthorized,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Fee rate must be between 0 and 10000 basis points")]
    InvalidFeeRate,
    #[msg("Pool is already initialized")]
    AlreadyInitialized,
    #[msg("Pool is not initialized")]
    NotInitialized,
    #[msg("Not enough liquidity in the pool")]
    InsufficientLiquidity,
    #[msg("The output amount is less than the minimum required due to slippage.")]
    SlippageExceeded,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Constant product decreased after swap")]
    InvariantViolation,
    #[msg("Token A and token B must be different mints")]
    IdenticalMints,
    #[msg("Vault account does not match the pool")]
    InvalidVault,
    #[msg("Vault balance does not cover the recorded reserve")]
    ReserveMismatch,
}
