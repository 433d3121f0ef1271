use anchor_lang::prelude::*;

use crate::errors::{MosaicError, MosaicResult};
use crate::notify::{CompositionNotice, RewardNotifier};
use crate::state::{AccountState, SlotStore};
use crate::utils::batch_cost;

/// A batch that passed every precondition against a given capacity and
/// unit price. Only `validate_batch` builds one, so committing never
/// has to re-check the batch.
#[derive(Debug)]
pub struct ValidatedBatch<'a> {
    indices: &'a [u32],
    values: &'a [u64],
    payment: u64,
}

impl ValidatedBatch<'_> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn payment(&self) -> u64 {
        self.payment
    }
}

/// Checks lengths, then every index, then the payment, in that order.
/// The whole batch is checked before anything is written.
pub fn validate_batch<'a>(
    capacity: u32,
    unit_price: u64,
    indices: &'a [u32],
    values: &'a [u64],
    payment: u64,
) -> MosaicResult<ValidatedBatch<'a>> {
    if indices.len() != values.len() {
        return Err(MosaicError::ArrayLengthMismatch);
    }

    if indices.iter().any(|&index| index >= capacity) {
        return Err(MosaicError::IndexOutOfRange);
    }

    // Over- and under-payment are both rejected, nothing is refunded
    match batch_cost(indices.len(), unit_price) {
        Some(cost) if cost == payment => {}
        _ => return Err(MosaicError::InsufficientPayment),
    }

    Ok(ValidatedBatch {
        indices,
        values,
        payment,
    })
}

/// Outcome of an accepted composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositionReceipt {
    pub beneficiary: Pubkey,
    pub payment: u64,
    pub tile_delta: u64,
    pub total_spent: u64,
    pub tiles_placed: u64,
}

impl CompositionReceipt {
    pub fn notice(&self) -> CompositionNotice {
        CompositionNotice {
            beneficiary: self.beneficiary,
            amount: self.payment,
            tile_delta: self.tile_delta,
            total_spent: self.total_spent,
            tiles_placed: self.tiles_placed,
        }
    }
}

pub struct CompositionEngine<'a, S, N> {
    store: &'a mut S,
    notifier: &'a mut N,
}

impl<'a, S: SlotStore, N: RewardNotifier> CompositionEngine<'a, S, N> {
    pub fn new(store: &'a mut S, notifier: &'a mut N) -> Self {
        Self { store, notifier }
    }

    pub fn validate<'b>(
        &self,
        unit_price: u64,
        indices: &'b [u32],
        values: &'b [u64],
        payment: u64,
    ) -> MosaicResult<ValidatedBatch<'b>> {
        validate_batch(self.store.capacity(), unit_price, indices, values, payment)
    }

    /// Writes every pair in order on behalf of `beneficiary`, credits the
    /// ledger and notifies the reward collaborator once.
    pub fn commit(
        &mut self,
        batch: ValidatedBatch<'_>,
        beneficiary: Pubkey,
        ledger: &mut AccountState,
        now_slot: u64,
    ) -> MosaicResult<CompositionReceipt> {
        for (&index, &value) in batch.indices.iter().zip(batch.values) {
            self.store.write(index, value, beneficiary)?;
        }

        let tile_delta = batch.len() as u64;
        ledger.record_composition(batch.payment, tile_delta, now_slot)?;

        let receipt = CompositionReceipt {
            beneficiary,
            payment: batch.payment,
            tile_delta,
            total_spent: ledger.total_spent,
            tiles_placed: ledger.tiles_placed,
        };
        self.notifier.notify(&receipt.notice());

        Ok(receipt)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn compose(
        &mut self,
        unit_price: u64,
        beneficiary: Pubkey,
        indices: &[u32],
        values: &[u64],
        payment: u64,
        ledger: &mut AccountState,
        now_slot: u64,
    ) -> MosaicResult<CompositionReceipt> {
        let batch = self.validate(unit_price, indices, values, payment)?;
        self.commit(batch, beneficiary, ledger, now_slot)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::state::{empty_grid, SlotGridData, SlotSource};
    use crate::utils::DEFAULT_UNIT_PRICE;

    const PRICE: u64 = DEFAULT_UNIT_PRICE;

    fn first_row() -> Vec<u32> {
        (0..10).collect()
    }

    #[test]
    fn test_single_tile() {
        let user = Pubkey::new_unique();
        let mut data = empty_grid(100);
        let mut grid = SlotGridData::new(&mut data[..]).unwrap();
        let mut notifier = RecordingNotifier::default();
        let mut ledger = AccountState::default();

        let receipt = CompositionEngine::new(&mut grid, &mut notifier)
            .compose(PRICE, user, &[0], &[1], PRICE, &mut ledger, 1)
            .unwrap();

        assert_eq!(receipt.tile_delta, 1);
        let slot = grid.read_range(0, 0).unwrap()[0];
        assert_eq!(slot.owner, user);
        assert_eq!(slot.value, 1);
        assert_eq!(slot.velocity, 1);
        assert_eq!(ledger.total_spent, PRICE);
        assert_eq!(ledger.tiles_placed, 1);
    }

    #[test]
    fn test_payment_must_match_batch() {
        let user = Pubkey::new_unique();
        let mut data = empty_grid(100);
        let mut grid = SlotGridData::new(&mut data[..]).unwrap();
        let mut notifier = RecordingNotifier::default();
        let mut ledger = AccountState::default();
        let mut engine = CompositionEngine::new(&mut grid, &mut notifier);

        let pattern = [1, 0, 1, 0, 1, 0, 1, 0, 1, 0];
        engine
            .compose(PRICE, user, &first_row(), &pattern, 10 * PRICE, &mut ledger, 1)
            .unwrap();

        let second_row: Vec<u32> = (10..20).collect();
        let values: Vec<u64> = (10..20).collect();
        assert!(matches!(
            engine.compose(PRICE, user, &second_row, &values, PRICE, &mut ledger, 2),
            Err(MosaicError::InsufficientPayment)
        ));
        assert!(matches!(
            engine.compose(PRICE, user, &second_row, &values, 11 * PRICE, &mut ledger, 2),
            Err(MosaicError::InsufficientPayment)
        ));
        engine
            .compose(PRICE, user, &second_row, &values, 10 * PRICE, &mut ledger, 2)
            .unwrap();

        assert_eq!(ledger.tiles_placed, 20);
        assert_eq!(ledger.total_spent, 20 * PRICE);
        assert_eq!(ledger.compositions, 2);
        assert_eq!(notifier.notices.len(), 2);
        assert_eq!(grid.read(15).unwrap().value, 15);
        assert_eq!(grid.read(0).unwrap().value, 1);
        assert_eq!(grid.read(1).unwrap().value, 0);
        assert_eq!(grid.read(1).unwrap().velocity, 1);
    }

    #[test]
    fn test_validation_order() {
        // Mismatched lengths win over a bad index and a bad payment
        assert!(matches!(
            validate_batch(10, PRICE, &[0, 99], &[1], 0),
            Err(MosaicError::ArrayLengthMismatch)
        ));
        // A bad index wins over a bad payment
        assert!(matches!(
            validate_batch(10, PRICE, &[0, 10], &[1, 1], 0),
            Err(MosaicError::IndexOutOfRange)
        ));
        assert!(matches!(
            validate_batch(10, PRICE, &[0, 9], &[1, 1], PRICE),
            Err(MosaicError::InsufficientPayment)
        ));
        assert_eq!(
            validate_batch(10, PRICE, &[0, 9], &[1, 1], 2 * PRICE).unwrap().len(),
            2
        );
    }

    #[test]
    fn test_oversized_batch_cost_is_a_payment_error() {
        assert!(matches!(
            validate_batch(10, u64::MAX, &[0, 1], &[1, 1], u64::MAX),
            Err(MosaicError::InsufficientPayment)
        ));
    }

    #[test]
    fn test_rejected_batch_writes_nothing() {
        let user = Pubkey::new_unique();
        let mut data = empty_grid(10);
        let before = data.clone();
        let mut notifier = RecordingNotifier::default();
        let mut ledger = AccountState::default();
        {
            let mut grid = SlotGridData::new(&mut data[..]).unwrap();
            let mut engine = CompositionEngine::new(&mut grid, &mut notifier);

            // Valid prefix followed by an out-of-range index
            assert!(matches!(
                engine.compose(PRICE, user, &[0, 1, 10], &[5, 5, 5], 3 * PRICE, &mut ledger, 1),
                Err(MosaicError::IndexOutOfRange)
            ));
            assert!(matches!(
                engine.compose(PRICE, user, &[0, 1], &[5], 2 * PRICE, &mut ledger, 1),
                Err(MosaicError::ArrayLengthMismatch)
            ));
        }

        assert_eq!(data, before);
        assert_eq!(ledger.total_spent, 0);
        assert_eq!(ledger.compositions, 0);
        assert!(notifier.notices.is_empty());
    }

    #[test]
    fn test_repeated_index_overwrites() {
        let user = Pubkey::new_unique();
        let mut data = empty_grid(100);
        let mut grid = SlotGridData::new(&mut data[..]).unwrap();
        let mut notifier = RecordingNotifier::default();
        let mut ledger = AccountState::default();
        let mut engine = CompositionEngine::new(&mut grid, &mut notifier);

        engine.compose(PRICE, user, &[0], &[1], PRICE, &mut ledger, 1).unwrap();
        engine.compose(PRICE, user, &[0], &[1], PRICE, &mut ledger, 2).unwrap();
        engine.compose(PRICE, user, &[0], &[125], PRICE, &mut ledger, 3).unwrap();
        engine
            .compose(PRICE, user, &[0, 1, 0], &[2, 3, 9], 3 * PRICE, &mut ledger, 4)
            .unwrap();

        let slot = grid.read(0).unwrap();
        assert_eq!(slot.value, 9);
        assert_eq!(slot.velocity, 5);
        assert_eq!(grid.read(1).unwrap().velocity, 1);
        assert_eq!(grid.header().total_writes, 6);
        assert_eq!(ledger.tiles_placed, 6);
        assert_eq!(ledger.total_spent, 6 * PRICE);
    }

    #[test]
    fn test_same_write_twice_changes_only_velocity() {
        let user = Pubkey::new_unique();
        let mut data = empty_grid(4);
        let mut grid = SlotGridData::new(&mut data[..]).unwrap();
        let mut notifier = RecordingNotifier::default();
        let mut ledger = AccountState::default();
        let mut engine = CompositionEngine::new(&mut grid, &mut notifier);

        engine.compose(PRICE, user, &[3], &[42], PRICE, &mut ledger, 1).unwrap();
        engine.compose(PRICE, user, &[3], &[42], PRICE, &mut ledger, 1).unwrap();
        drop(engine);

        let slot = grid.read(3).unwrap();
        assert_eq!(slot.value, 42);
        assert_eq!(slot.velocity, 2);
    }

    #[test]
    fn test_on_behalf_of_credits_beneficiary() {
        let beneficiary = Pubkey::new_unique();
        let mut data = empty_grid(4);
        let mut grid = SlotGridData::new(&mut data[..]).unwrap();
        let mut notifier = RecordingNotifier::default();
        let mut ledger = AccountState::default();

        CompositionEngine::new(&mut grid, &mut notifier)
            .compose(PRICE, beneficiary, &[2, 3], &[7, 8], 2 * PRICE, &mut ledger, 1)
            .unwrap();

        assert_eq!(grid.read(2).unwrap().owner, beneficiary);
        assert_eq!(
            notifier.notices,
            vec![CompositionNotice {
                beneficiary,
                amount: 2 * PRICE,
                tile_delta: 2,
                total_spent: 2 * PRICE,
                tiles_placed: 2,
            }]
        );
    }

    #[test]
    fn test_empty_batch() {
        let user = Pubkey::new_unique();
        let mut data = empty_grid(4);
        let before = data.clone();
        let mut notifier = RecordingNotifier::default();
        let mut ledger = AccountState::default();
        {
            let mut grid = SlotGridData::new(&mut data[..]).unwrap();
            let mut engine = CompositionEngine::new(&mut grid, &mut notifier);

            assert!(matches!(
                engine.compose(PRICE, user, &[], &[], PRICE, &mut ledger, 1),
                Err(MosaicError::InsufficientPayment)
            ));
            let receipt = engine.compose(PRICE, user, &[], &[], 0, &mut ledger, 1).unwrap();
            assert_eq!(receipt.tile_delta, 0);
        }

        assert_eq!(data, before);
        assert_eq!(ledger.compositions, 1);
        assert_eq!(notifier.notices.len(), 1);
    }

    #[test]
    fn test_interleaved_accounts_keep_ledgers_consistent() {
        let users: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        let mut data = empty_grid(100);
        let mut grid = SlotGridData::new(&mut data[..]).unwrap();
        let mut notifier = RecordingNotifier::default();
        let mut ledgers: HashMap<Pubkey, AccountState> = HashMap::new();
        let mut expected: HashMap<Pubkey, (u64, u64)> = HashMap::new();
        let mut last_writer: HashMap<u32, (Pubkey, u64)> = HashMap::new();
        let mut velocities = [0u64; 100];

        let mut engine = CompositionEngine::new(&mut grid, &mut notifier);
        for round in 0..60u64 {
            let user = users[(round % 3) as usize];
            // Overlapping windows over the same ten indices
            let start = (round % 5) as u32 * 2;
            let len = 1 + (round % 4) as u32;
            let indices: Vec<u32> = (start..start + len).collect();
            let values: Vec<u64> = indices.iter().map(|&i| round * 1000 + i as u64).collect();
            let ledger = ledgers.entry(user).or_default();

            // Every third round is first tried with a short payment
            if round % 3 == 0 {
                assert!(engine
                    .compose(PRICE, user, &indices, &values, PRICE * (len as u64 - 1), ledger, round)
                    .is_err());
            }
            engine
                .compose(PRICE, user, &indices, &values, PRICE * len as u64, ledger, round)
                .unwrap();

            let totals = expected.entry(user).or_default();
            totals.0 += PRICE * len as u64;
            totals.1 += len as u64;
            for (&index, &value) in indices.iter().zip(&values) {
                last_writer.insert(index, (user, value));
                velocities[index as usize] += 1;
            }
        }
        drop(engine);

        for user in &users {
            let ledger = &ledgers[user];
            let (spent, tiles) = expected[user];
            assert_eq!(ledger.total_spent, spent);
            assert_eq!(ledger.tiles_placed, tiles);
            assert_eq!(ledger.total_spent, ledger.tiles_placed * PRICE);
        }
        for (&index, &(owner, value)) in &last_writer {
            let slot = grid.read(index).unwrap();
            assert_eq!(slot.owner, owner);
            assert_eq!(slot.value, value);
            assert_eq!(slot.velocity, velocities[index as usize]);
        }
        assert_eq!(notifier.notices.len(), 60);
    }
}
