use anchor_lang::prelude::*;

use crate::errors::{MosaicError, MosaicResult};

#[account]
#[derive(InitSpace)]
pub struct GridConfig {
    pub authority: Pubkey,
    pub slot_grid: Pubkey, // Keypair account, see SlotGrid
    /// Receives every composition payment
    pub treasury: Pubkey,
    /// External program owning the per-account gauges
    pub reward_program: Pubkey,
    /// Lamports per tile, fixed at initialization
    pub unit_price: u64,
    pub total_tiles: u64,
    pub total_collected: u64,
    pub total_compositions: u64,
    pub bump: u8,
    pub _padding: [u8; 64],
}

impl GridConfig {
    pub const SEED: &'static [u8] = b"grid_config";

    pub fn record_composition(&mut self, payment: u64, tile_delta: u64) -> MosaicResult<()> {
        self.total_tiles = self
            .total_tiles
            .checked_add(tile_delta)
            .ok_or(MosaicError::Overflow)?;
        self.total_collected = self
            .total_collected
            .checked_add(payment)
            .ok_or(MosaicError::Overflow)?;
        self.total_compositions = self
            .total_compositions
            .checked_add(1)
            .ok_or(MosaicError::Overflow)?;
        Ok(())
    }
}
