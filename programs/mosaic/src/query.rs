//! Read-only projections of the grid, the account ledger and the external
//! gauges. Every function works on one fetched account snapshot, so the
//! same decoders back the view instructions and off-chain clients reading
//! ranges too large for program return data.

use anchor_lang::prelude::*;

use crate::errors::{MosaicError, MosaicResult};
use crate::state::{AccountState, Slot, SlotGridData, SlotSource};

/// Most slots a single `get_slots` call returns (return data is capped at 1KB).
pub const MAX_VIEW_SLOTS: u32 = 16;

/// Most gauge bytes copied into a `GaugeView`.
pub const MAX_GAUGE_VIEW_BYTES: usize = 768;

pub const GAUGE_SEED: &[u8] = b"gauge";

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotView {
    pub index: u32,
    pub owner: Pubkey,
    pub value: u64,
    pub velocity: u64,
}

impl SlotView {
    pub fn new(index: u32, slot: &Slot) -> Self {
        Self {
            index,
            owner: slot.owner,
            value: slot.value,
            velocity: slot.velocity,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountView {
    pub account: Pubkey,
    pub total_spent: u64,
    pub tiles_placed: u64,
    pub compositions: u64,
    pub last_composed_slot: u64,
}

impl AccountView {
    /// View of an address that never composed.
    pub fn empty(account: Pubkey) -> Self {
        Self {
            account,
            ..Self::default()
        }
    }
}

impl From<&AccountState> for AccountView {
    fn from(state: &AccountState) -> Self {
        Self {
            account: state.beneficiary,
            total_spent: state.total_spent,
            tiles_placed: state.tiles_placed,
            compositions: state.compositions,
            last_composed_slot: state.last_composed_slot,
        }
    }
}

/// Raw projection of a gauge owned by the reward program. Decoding `data`
/// is up to the caller; this program does not know the gauge schema.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct GaugeView {
    pub account: Pubkey,
    pub gauge: Pubkey,
    pub active: bool,
    pub lamports: u64,
    /// Full length of the gauge data; `data` holds at most
    /// `MAX_GAUGE_VIEW_BYTES` of it
    pub data_len: u32,
    pub data: Vec<u8>,
}

pub fn slot(grid_data: &[u8], index: u32) -> MosaicResult<SlotView> {
    let grid = SlotGridData::new(grid_data)?;
    Ok(SlotView::new(index, &grid.read(index)?))
}

/// Slots `start..=end`, inclusive on both ends.
pub fn slots(grid_data: &[u8], start: u32, end: u32) -> MosaicResult<Vec<SlotView>> {
    let grid = SlotGridData::new(grid_data)?;
    Ok(grid
        .read_range(start, end)?
        .iter()
        .zip(start..)
        .map(|(slot, index)| SlotView::new(index, slot))
        .collect())
}

/// `data` is `None` (or empty) when the ledger account was never created.
pub fn account_state(account: Pubkey, data: Option<&[u8]>) -> MosaicResult<AccountView> {
    let mut bytes = match data {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return Ok(AccountView::empty(account)),
    };

    let state = AccountState::try_deserialize(&mut bytes)
        .map_err(|_| MosaicError::InvalidAccountState)?;
    if state.beneficiary != account {
        return Err(MosaicError::InvalidAccountState);
    }
    Ok(AccountView::from(&state))
}

pub fn account_state_address(program_id: &Pubkey, account: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[AccountState::SEED, account.as_ref()], program_id).0
}

pub fn gauge_address(reward_program: &Pubkey, account: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[GAUGE_SEED, account.as_ref()], reward_program).0
}

/// A gauge counts as active once the reward program owns it and has
/// written data into it.
pub fn gauge_view(
    account: Pubkey,
    gauge: Pubkey,
    gauge_owner: &Pubkey,
    reward_program: &Pubkey,
    lamports: u64,
    data: &[u8],
) -> GaugeView {
    if gauge_owner != reward_program || data.is_empty() {
        return GaugeView {
            account,
            gauge,
            ..GaugeView::default()
        };
    }

    GaugeView {
        account,
        gauge,
        active: true,
        lamports,
        data_len: data.len() as u32,
        data: data[..data.len().min(MAX_GAUGE_VIEW_BYTES)].to_vec(),
    }
}
