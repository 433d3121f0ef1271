use anchor_lang::solana_program::entrypoint::MAX_PERMITTED_DATA_INCREASE;

use crate::errors::{MosaicError, MosaicResult};
use crate::state::{read_header, write_header, SlotGrid};

/// A validated capacity increase, with the account sizes before and after.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthPlan {
    pub old_capacity: u32,
    pub new_capacity: u32,
    pub old_len: usize,
    pub new_len: usize,
}

impl GrowthPlan {
    pub fn added_slots(&self) -> u32 {
        self.new_capacity - self.old_capacity
    }
}

/// Capacity only grows. A single step is also bounded by how far the
/// runtime lets an account grow in one instruction.
pub fn plan_growth(current: u32, new_capacity: u32) -> MosaicResult<GrowthPlan> {
    if new_capacity <= current {
        return Err(MosaicError::InvalidCapacity);
    }

    let old_len = SlotGrid::space(current);
    let new_len = SlotGrid::space(new_capacity);
    if new_len - old_len > MAX_PERMITTED_DATA_INCREASE {
        return Err(MosaicError::GrowthStepTooLarge);
    }

    Ok(GrowthPlan {
        old_capacity: current,
        new_capacity,
        old_len,
        new_len,
    })
}

/// Zeroes the new slot range and publishes the new capacity. `data` must
/// already be resized to `plan.new_len`.
pub fn apply_growth(data: &mut [u8], plan: &GrowthPlan) -> MosaicResult<()> {
    if data.len() < plan.new_len {
        return Err(MosaicError::InvalidSlotGrid);
    }

    let mut header = read_header(data)?;
    if header.capacity != plan.old_capacity {
        return Err(MosaicError::InvalidSlotGrid);
    }

    data[plan.old_len..plan.new_len].fill(0);
    header.capacity = plan.new_capacity;
    write_header(data, &header)
}
