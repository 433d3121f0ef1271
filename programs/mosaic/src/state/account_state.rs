use anchor_lang::prelude::*;

use crate::errors::{MosaicError, MosaicResult};

/// Per-beneficiary aggregates. Created on the first composition and only
/// ever grows.
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct AccountState {
    pub beneficiary: Pubkey,
    /// Lamports paid for tiles credited to this account
    pub total_spent: u64,
    pub tiles_placed: u64,
    pub compositions: u64,
    pub last_composed_slot: u64,
    pub bump: u8,
    pub _reserved: [u8; 32],
}

impl AccountState {
    pub const SEED: &'static [u8] = b"account";

    /// Called by the composition engine after validation, so only an
    /// overflow can fail here.
    pub fn record_composition(
        &mut self,
        payment: u64,
        tile_count: u64,
        slot: u64,
    ) -> MosaicResult<()> {
        self.total_spent = self
            .total_spent
            .checked_add(payment)
            .ok_or(MosaicError::Overflow)?;
        self.tiles_placed = self
            .tiles_placed
            .checked_add(tile_count)
            .ok_or(MosaicError::Overflow)?;
        self.compositions = self
            .compositions
            .checked_add(1)
            .ok_or(MosaicError::Overflow)?;
        self.last_composed_slot = slot;
        Ok(())
    }
}
