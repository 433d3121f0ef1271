use anchor_lang::prelude::*;
use crate::state::{GridConfig, SlotGrid};
use crate::errors::MosaicError;
use crate::utils::DEFAULT_UNIT_PRICE;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = 8 + GridConfig::INIT_SPACE,
        seeds = [GridConfig::SEED],
        bump
    )]
    pub grid_config: Account<'info, GridConfig>,

    /// The SlotGrid account must be pre-created by the client with:
    /// - owner = program ID
    /// - space = SlotGrid::space(initial_capacity)
    /// - data = all zeros
    #[account(zero)]
    pub slot_grid: AccountLoader<'info, SlotGrid>,

    /// CHECK: Any account may receive composition payments
    pub treasury: UncheckedAccount<'info>,

    /// CHECK: External reward program, only its address is recorded
    pub reward_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Initialize>,
    unit_price: Option<u64>,
    initial_capacity: u32,
) -> Result<()> {
    let unit_price = unit_price.unwrap_or(DEFAULT_UNIT_PRICE);
    require!(unit_price > 0, MosaicError::InvalidUnitPrice);
    require!(initial_capacity > 0, MosaicError::InvalidCapacity);
    require!(
        ctx.accounts.slot_grid.to_account_info().data_len() == SlotGrid::space(initial_capacity),
        MosaicError::InvalidCapacity
    );

    // Slots are already zeroed from account creation
    {
        let mut slot_grid = ctx.accounts.slot_grid.load_init()?;
        slot_grid.capacity = initial_capacity;
        slot_grid.total_writes = 0;
    }

    let config = &mut ctx.accounts.grid_config;
    config.authority = ctx.accounts.authority.key();
    config.slot_grid = ctx.accounts.slot_grid.key();
    config.treasury = ctx.accounts.treasury.key();
    config.reward_program = ctx.accounts.reward_program.key();
    config.unit_price = unit_price;
    config.total_tiles = 0;
    config.total_collected = 0;
    config.total_compositions = 0;
    config.bump = ctx.bumps.grid_config;
    config._padding = [0u8; 64];

    msg!(
        "Grid initialized with {} slots at {} lamports per tile",
        initial_capacity,
        unit_price
    );
    Ok(())
}
