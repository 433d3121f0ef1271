use anchor_lang::prelude::*;
use anchor_lang::system_program;
use crate::composition::{validate_batch, CompositionEngine};
use crate::errors::MosaicError;
use crate::notify::EventNotifier;
use crate::state::{read_header, AccountState, GridConfig, SlotGrid, SlotGridData};

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct ComposeFor<'info> {
    /// Pays for the tiles and for the ledger account on first use
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [GridConfig::SEED],
        bump = grid_config.bump
    )]
    pub grid_config: Account<'info, GridConfig>,

    #[account(
        mut,
        constraint = slot_grid.key() == grid_config.slot_grid @ MosaicError::InvalidSlotGrid
    )]
    pub slot_grid: AccountLoader<'info, SlotGrid>,

    /// Ledger entry of the beneficiary, not necessarily the payer
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + AccountState::INIT_SPACE,
        seeds = [AccountState::SEED, beneficiary.as_ref()],
        bump
    )]
    pub account_state: Account<'info, AccountState>,

    /// CHECK: Receives the payment, must match grid_config.treasury
    #[account(
        mut,
        constraint = treasury.key() == grid_config.treasury @ MosaicError::InvalidTreasury
    )]
    pub treasury: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<ComposeFor>,
    beneficiary: Pubkey,
    indices: Vec<u32>,
    values: Vec<u64>,
    payment: u64,
) -> Result<()> {
    let grid_info = ctx.accounts.slot_grid.to_account_info();
    let capacity = read_header(&grid_info.try_borrow_data()?)?.capacity;

    // Validate the whole batch before any lamports move or slots change
    let batch = validate_batch(
        capacity,
        ctx.accounts.grid_config.unit_price,
        &indices,
        &values,
        payment,
    )?;

    if payment > 0 {
        let cpi_accounts = system_program::Transfer {
            from: ctx.accounts.payer.to_account_info(),
            to: ctx.accounts.treasury.to_account_info(),
        };
        system_program::transfer(
            CpiContext::new(ctx.accounts.system_program.to_account_info(), cpi_accounts),
            payment,
        )?;
    }

    let account_state = &mut ctx.accounts.account_state;
    if account_state.beneficiary == Pubkey::default() {
        account_state.beneficiary = beneficiary;
        account_state.bump = ctx.bumps.account_state;
    }

    let now = Clock::get()?.slot;
    let receipt = {
        let mut data = grid_info.try_borrow_mut_data()?;
        let mut store = SlotGridData::new(&mut **data)?;
        let mut notifier = EventNotifier::new(ctx.accounts.payer.key());
        CompositionEngine::new(&mut store, &mut notifier).commit(
            batch,
            beneficiary,
            account_state,
            now,
        )?
    };

    ctx.accounts
        .grid_config
        .record_composition(receipt.payment, receipt.tile_delta)?;

    msg!(
        "Composed {} tiles for {}, paid {} lamports ({} tiles total)",
        receipt.tile_delta,
        beneficiary,
        receipt.payment,
        receipt.tiles_placed
    );

    Ok(())
}
