//! Boundary to the external reward collaborator. Composition results leave
//! the program as events; the gauge program consumes them off the log and
//! the grid never waits on, or rolls back for, that consumer.

use anchor_lang::prelude::*;

#[event]
pub struct TilesComposed {
    pub payer: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub tile_delta: u64,
    pub total_spent: u64,
    pub tiles_placed: u64,
}

#[event]
pub struct CapacityGrown {
    pub old_capacity: u32,
    pub new_capacity: u32,
}

/// Economic delta of one accepted composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositionNotice {
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub tile_delta: u64,
    /// Ledger totals for the beneficiary after this composition
    pub total_spent: u64,
    pub tiles_placed: u64,
}

pub trait RewardNotifier {
    /// Fire-and-forget; called exactly once per accepted composition.
    fn notify(&mut self, notice: &CompositionNotice);
}

/// Emits `TilesComposed` into the transaction log.
pub struct EventNotifier {
    payer: Pubkey,
}

impl EventNotifier {
    pub fn new(payer: Pubkey) -> Self {
        Self { payer }
    }
}

impl RewardNotifier for EventNotifier {
    fn notify(&mut self, notice: &CompositionNotice) {
        emit!(TilesComposed {
            payer: self.payer,
            beneficiary: notice.beneficiary,
            amount: notice.amount,
            tile_delta: notice.tile_delta,
            total_spent: notice.total_spent,
            tiles_placed: notice.tiles_placed,
        });
    }
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub notices: Vec<CompositionNotice>,
}

#[cfg(test)]
impl RewardNotifier for RecordingNotifier {
    fn notify(&mut self, notice: &CompositionNotice) {
        self.notices.push(*notice);
    }
}
