use anchor_lang::prelude::*;
use crate::state::GridConfig;
use crate::errors::MosaicError;

/// The unit price is not updatable: every ledger entry must keep
/// `total_spent == tiles_placed * unit_price`.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        constraint = authority.key() == grid_config.authority @ MosaicError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [GridConfig::SEED],
        bump = grid_config.bump
    )]
    pub grid_config: Account<'info, GridConfig>,
}

pub fn handler(
    ctx: Context<UpdateConfig>,
    treasury: Option<Pubkey>,
    reward_program: Option<Pubkey>,
    new_authority: Option<Pubkey>,
) -> Result<()> {
    let config = &mut ctx.accounts.grid_config;

    if let Some(treasury) = treasury {
        config.treasury = treasury;
        msg!("Updated treasury to {}", treasury);
    }

    if let Some(program) = reward_program {
        config.reward_program = program;
        msg!("Updated reward_program to {}", program);
    }

    if let Some(authority) = new_authority {
        config.authority = authority;
        msg!("Updated authority to {}", authority);
    }

    Ok(())
}
