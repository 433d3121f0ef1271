use anchor_lang::prelude::*;
use crate::errors::MosaicError;
use crate::query::{self, GaugeView};
use crate::state::GridConfig;

#[derive(Accounts)]
pub struct GetGauge<'info> {
    #[account(
        seeds = [GridConfig::SEED],
        bump = grid_config.bump
    )]
    pub grid_config: Account<'info, GridConfig>,

    /// CHECK: Gauge PDA of the reward program, address checked in the handler
    pub gauge: UncheckedAccount<'info>,
}

/// Read-through to the reward program's gauge for `beneficiary`.
pub fn handler(ctx: Context<GetGauge>, beneficiary: Pubkey) -> Result<GaugeView> {
    let reward_program = ctx.accounts.grid_config.reward_program;
    let gauge = ctx.accounts.gauge.to_account_info();
    require_keys_eq!(
        gauge.key(),
        query::gauge_address(&reward_program, &beneficiary),
        MosaicError::InvalidGauge
    );

    let data = gauge.try_borrow_data()?;
    Ok(query::gauge_view(
        beneficiary,
        gauge.key(),
        gauge.owner,
        &reward_program,
        gauge.lamports(),
        &data,
    ))
}
