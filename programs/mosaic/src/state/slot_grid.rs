use std::mem::size_of;
use std::ops::Range;

use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::errors::{MosaicError, MosaicResult};

/// Amount added to a slot's velocity on every accepted write.
pub const VELOCITY_STEP: u64 = 1;

/// Header of the slot grid account. The slots follow it as a packed
/// array of `Slot` records, `capacity` entries long.
///
/// The account is not a PDA: the client creates it up front because
/// accounts above 10KB cannot be allocated from inside a CPI.
#[account(zero_copy)]
pub struct SlotGrid {
    pub capacity: u32,
    pub _padding: u32,
    /// Accepted slot writes since initialization
    pub total_writes: u64,
    pub _reserved: [u64; 6],
}

impl SlotGrid {
    pub const HEADER_OFFSET: usize = 8;
    pub const SLOTS_OFFSET: usize = Self::HEADER_OFFSET + size_of::<SlotGrid>();
    pub const SLOT_LEN: usize = size_of::<Slot>();

    /// Account size needed to hold `capacity` slots.
    pub fn space(capacity: u32) -> usize {
        Self::SLOTS_OFFSET + (capacity as usize) * Self::SLOT_LEN
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Slot {
    /// Last writer, `Pubkey::default()` before the first write
    pub owner: Pubkey,
    pub value: u64,
    pub velocity: u64,
}

pub fn read_header(data: &[u8]) -> MosaicResult<SlotGrid> {
    let src = data
        .get(SlotGrid::HEADER_OFFSET..SlotGrid::SLOTS_OFFSET)
        .ok_or(MosaicError::InvalidSlotGrid)?;
    Ok(bytemuck::pod_read_unaligned(src))
}

pub fn write_header(data: &mut [u8], header: &SlotGrid) -> MosaicResult<()> {
    let dst = data
        .get_mut(SlotGrid::HEADER_OFFSET..SlotGrid::SLOTS_OFFSET)
        .ok_or(MosaicError::InvalidSlotGrid)?;
    dst.copy_from_slice(bytemuck::bytes_of(header));
    Ok(())
}

/// Read access to a grid of slots.
pub trait SlotSource {
    fn capacity(&self) -> u32;

    fn read(&self, index: u32) -> MosaicResult<Slot>;

    /// Slots `start..=end` in index order.
    fn read_range(&self, start: u32, end: u32) -> MosaicResult<Vec<Slot>> {
        if start > end || end >= self.capacity() {
            return Err(MosaicError::IndexOutOfRange);
        }
        (start..=end).map(|index| self.read(index)).collect()
    }
}

/// Mutable grid. Only the composition engine writes through this.
pub trait SlotStore: SlotSource {
    /// Overwrites the slot's value and owner and bumps its velocity.
    /// Returns the new velocity.
    fn write(&mut self, index: u32, value: u64, writer: Pubkey) -> MosaicResult<u64>;
}

/// Slot grid laid over raw account bytes (discriminator, header, slots).
///
/// Records are copied in and out, so the buffer needs no particular
/// alignment.
pub struct SlotGridData<D> {
    data: D,
    header: SlotGrid,
}

impl<D: AsRef<[u8]>> SlotGridData<D> {
    pub fn new(data: D) -> MosaicResult<Self> {
        let header = read_header(data.as_ref())?;
        if data.as_ref().len() < SlotGrid::space(header.capacity) {
            return Err(MosaicError::InvalidSlotGrid);
        }
        Ok(Self { data, header })
    }

    pub fn header(&self) -> &SlotGrid {
        &self.header
    }

    fn slot_bytes(&self, index: u32) -> MosaicResult<Range<usize>> {
        if index >= self.header.capacity {
            return Err(MosaicError::IndexOutOfRange);
        }
        let start = SlotGrid::SLOTS_OFFSET + (index as usize) * SlotGrid::SLOT_LEN;
        Ok(start..start + SlotGrid::SLOT_LEN)
    }
}

impl<D: AsRef<[u8]>> SlotSource for SlotGridData<D> {
    fn capacity(&self) -> u32 {
        self.header.capacity
    }

    fn read(&self, index: u32) -> MosaicResult<Slot> {
        let range = self.slot_bytes(index)?;
        Ok(bytemuck::pod_read_unaligned(&self.data.as_ref()[range]))
    }
}

impl<D: AsRef<[u8]> + AsMut<[u8]>> SlotStore for SlotGridData<D> {
    fn write(&mut self, index: u32, value: u64, writer: Pubkey) -> MosaicResult<u64> {
        let range = self.slot_bytes(index)?;
        let mut slot: Slot = bytemuck::pod_read_unaligned(&self.data.as_ref()[range.clone()]);

        slot.velocity = slot
            .velocity
            .checked_add(VELOCITY_STEP)
            .ok_or(MosaicError::Overflow)?;
        slot.owner = writer;
        slot.value = value;

        self.header.total_writes = self
            .header
            .total_writes
            .checked_add(1)
            .ok_or(MosaicError::Overflow)?;

        let data = self.data.as_mut();
        data[range].copy_from_slice(bytemuck::bytes_of(&slot));
        write_header(data, &self.header)?;

        Ok(slot.velocity)
    }
}

/// Zeroed account bytes holding an empty grid of `capacity` slots.
#[cfg(test)]
pub(crate) fn empty_grid(capacity: u32) -> Vec<u8> {
    let mut data = vec![0u8; SlotGrid::space(capacity)];
    let header = SlotGrid {
        capacity,
        ..SlotGrid::zeroed()
    };
    write_header(&mut data, &header).unwrap();
    data
}
