use anchor_lang::prelude::*;

pub mod errors;
pub mod state;
pub mod utils;
pub mod capacity;
pub mod composition;
pub mod notify;
pub mod query;
pub mod instructions;

use instructions::*;
use query::{AccountView, GaugeView, SlotView};

declare_id!("BNFFWDu9YTe2fhmM17B6BoxuL1TktJu5wKhjzQebhbaN");

#[program]
pub mod mosaic {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        unit_price: Option<u64>,
        initial_capacity: u32,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, unit_price, initial_capacity)
    }

    pub fn update_config(
        ctx: Context<UpdateConfig>,
        treasury: Option<Pubkey>,
        reward_program: Option<Pubkey>,
        new_authority: Option<Pubkey>,
    ) -> Result<()> {
        instructions::update_config::handler(ctx, treasury, reward_program, new_authority)
    }

    pub fn compose_for(
        ctx: Context<ComposeFor>,
        beneficiary: Pubkey,
        indices: Vec<u32>,
        values: Vec<u64>,
        payment: u64,
    ) -> Result<()> {
        instructions::compose_for::handler(ctx, beneficiary, indices, values, payment)
    }

    pub fn grow_capacity(ctx: Context<GrowCapacity>, new_capacity: u32) -> Result<()> {
        instructions::grow_capacity::handler(ctx, new_capacity)
    }

    pub fn get_slots(ctx: Context<GetSlots>, start: u32, end: u32) -> Result<Vec<SlotView>> {
        instructions::get_slots::handler(ctx, start, end)
    }

    pub fn get_account_state(
        ctx: Context<GetAccountState>,
        beneficiary: Pubkey,
    ) -> Result<AccountView> {
        instructions::get_account_state::handler(ctx, beneficiary)
    }

    pub fn get_gauge(ctx: Context<GetGauge>, beneficiary: Pubkey) -> Result<GaugeView> {
        instructions::get_gauge::handler(ctx, beneficiary)
    }
}
