use anchor_lang::prelude::*;
use crate::query::{self, AccountView};
use crate::state::AccountState;

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct GetAccountState<'info> {
    /// CHECK: May not exist yet, decoded in the handler
    #[account(
        seeds = [AccountState::SEED, beneficiary.as_ref()],
        bump
    )]
    pub account_state: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<GetAccountState>, beneficiary: Pubkey) -> Result<AccountView> {
    let info = ctx.accounts.account_state.to_account_info();
    if info.owner != ctx.program_id {
        return Ok(AccountView::empty(beneficiary));
    }

    let data = info.try_borrow_data()?;
    Ok(query::account_state(beneficiary, Some(&**data))?)
}
