use anchor_lang::prelude::*;

use crate::{error::AmmError, state::Pool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Initialize,
    Deposit,
    Swap,
    Withdraw,
}

impl Operation {
    /// Liquidity is controlled by the pool authority; trading is open to anyone.
    pub fn is_privileged(self) -> bool {
        matches!(self, Operation::Deposit | Operation::Withdraw)
    }
}

/// Checks `caller` may run `operation` against `pool`.
///
/// Initialize has nothing to check against: its caller becomes the authority.
pub fn authorize(operation: Operation, caller: &Pubkey, pool: &Pool) -> Result<()> {
    if operation.is_privileged() {
        require_keys_eq!(*caller, pool.authority, AmmError::Unauthorized);
    }
    Ok(())
}
