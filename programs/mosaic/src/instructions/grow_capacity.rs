use anchor_lang::prelude::*;
use anchor_lang::system_program;
use crate::capacity::{apply_growth, plan_growth};
use crate::errors::MosaicError;
use crate::notify::CapacityGrown;
use crate::state::{read_header, GridConfig, SlotGrid};

#[derive(Accounts)]
pub struct GrowCapacity<'info> {
    /// Only the grid authority can grow the grid; it also pays the extra rent
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [GridConfig::SEED],
        bump = grid_config.bump,
        has_one = authority @ MosaicError::Unauthorized,
    )]
    pub grid_config: Account<'info, GridConfig>,

    #[account(
        mut,
        constraint = slot_grid.key() == grid_config.slot_grid @ MosaicError::InvalidSlotGrid
    )]
    pub slot_grid: AccountLoader<'info, SlotGrid>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<GrowCapacity>, new_capacity: u32) -> Result<()> {
    let grid_info = ctx.accounts.slot_grid.to_account_info();
    let current = read_header(&grid_info.try_borrow_data()?)?.capacity;
    let plan = plan_growth(current, new_capacity)?;

    // Keep the grown account rent exempt
    let rent_due = Rent::get()?
        .minimum_balance(plan.new_len)
        .saturating_sub(grid_info.lamports());
    if rent_due > 0 {
        let cpi_accounts = system_program::Transfer {
            from: ctx.accounts.authority.to_account_info(),
            to: grid_info.clone(),
        };
        system_program::transfer(
            CpiContext::new(ctx.accounts.system_program.to_account_info(), cpi_accounts),
            rent_due,
        )?;
    }

    grid_info.realloc(plan.new_len, true)?;
    {
        let mut data = grid_info.try_borrow_mut_data()?;
        apply_growth(&mut **data, &plan)?;
    }

    emit!(CapacityGrown {
        old_capacity: plan.old_capacity,
        new_capacity: plan.new_capacity,
    });

    msg!(
        "Grew grid by {} slots to {}, rent top-up {} lamports",
        plan.added_slots(),
        plan.new_capacity,
        rent_due
    );

    Ok(())
}
