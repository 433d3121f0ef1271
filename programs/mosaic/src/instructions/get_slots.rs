use anchor_lang::prelude::*;
use crate::errors::MosaicError;
use crate::query::{self, SlotView, MAX_VIEW_SLOTS};
use crate::state::{GridConfig, SlotGrid};

#[derive(Accounts)]
pub struct GetSlots<'info> {
    #[account(
        seeds = [GridConfig::SEED],
        bump = grid_config.bump
    )]
    pub grid_config: Account<'info, GridConfig>,

    #[account(
        constraint = slot_grid.key() == grid_config.slot_grid @ MosaicError::InvalidSlotGrid
    )]
    pub slot_grid: AccountLoader<'info, SlotGrid>,
}

/// Inclusive range read. Wider ranges go through `query::slots` off-chain.
pub fn handler(ctx: Context<GetSlots>, start: u32, end: u32) -> Result<Vec<SlotView>> {
    require!(start <= end, MosaicError::IndexOutOfRange);
    require!(end - start < MAX_VIEW_SLOTS, MosaicError::ViewRangeTooLarge);

    let grid_info = ctx.accounts.slot_grid.to_account_info();
    let data = grid_info.try_borrow_data()?;
    Ok(query::slots(&data, start, end)?)
}
