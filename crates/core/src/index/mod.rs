//! In-memory block index with running session statistics.
//!
//! A [`BlockIndex`] is built once from a bootstrap payload and then fed block
//! events by a single writer. Block numbers are only ever added; the ordered
//! sequence only grows at the front. Readers get owned [`IndexSnapshot`]s, so
//! nothing they do can reach back into the index.

mod session;
mod snapshot;

pub use session::SessionCounters;
pub use snapshot::{ExplorerDetails, IndexSnapshot};

use crate::{
    block::BlockRecord,
    hook::{NilHook, OnBaseFeeChanged},
    payload::{BlockData, InitialData},
};
use alloy::primitives::U256;
use chrono::{DateTime, Utc};
use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};
use tracing::{debug, warn};

/// Result of [`BlockIndex::insert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

impl InsertOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}

pub struct BlockIndex {
    /// Maps block number to its record. Records are shared with snapshots.
    blocks: HashMap<u64, Arc<BlockRecord>>,
    /// Known block numbers, newest first.
    order: VecDeque<u64>,
    details: ExplorerDetails,
    session: SessionCounters,
    hook: Arc<dyn OnBaseFeeChanged>,
}

impl std::fmt::Debug for BlockIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockIndex")
            .field("blocks", &self.blocks.len())
            .field("details", &self.details)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl BlockIndex {
    pub fn new(initial: InitialData) -> Self {
        Self::with_start_time(initial, Utc::now())
    }

    /// Builds the index with an explicit session start time.
    pub fn with_start_time(initial: InitialData, since: DateTime<Utc>) -> Self {
        let InitialData {
            blocks: initial_blocks,
            base,
            block_number,
        } = initial;

        let (current_block, current_base_fee, current_priority_fee) = initial_blocks
            .first()
            .map(|b| (b.number, b.base_fee, b.priority_fee))
            .unwrap_or((block_number, U256::ZERO, U256::ZERO));

        let mut blocks = HashMap::with_capacity(initial_blocks.len());
        let mut order = VecDeque::with_capacity(initial_blocks.len());
        for block in initial_blocks {
            if blocks.contains_key(&block.number) {
                debug!("repeat block {} in bootstrap payload", block.number);
                continue;
            }
            // bootstrap list is newest first already
            order.push_back(block.number);
            blocks.insert(block.number, Arc::new(block));
        }
        debug!(
            "bootstrapped index with {} blocks, head {current_block}",
            order.len()
        );

        Self {
            blocks,
            order,
            details: ExplorerDetails {
                base,
                current_block,
                current_base_fee,
                current_priority_fee,
            },
            session: SessionCounters::new(since),
            hook: Arc::new(NilHook),
        }
    }

    /// Sets the hook invoked after every accepted insert.
    pub fn with_hook(mut self, hook: Arc<dyn OnBaseFeeChanged>) -> Self {
        self.hook = hook;
        self
    }

    /// Adds a new block and folds it into the session counters.
    ///
    /// A block number that is already indexed is ignored entirely, whatever its payload.
    pub fn insert(&mut self, data: BlockData) -> InsertOutcome {
        let BlockData { block, base } = data;

        if self.contains(block.number) {
            debug!("repeat block {}", block.number);
            return InsertOutcome::Duplicate;
        }

        if block.number < self.details.current_block {
            warn!(
                "block {} arrived after block {}; keeping arrival order",
                block.number, self.details.current_block
            );
        }

        self.session.record(&block);

        self.details.current_base_fee = block.base_fee;
        self.details.current_priority_fee = block.priority_fee;
        self.details.current_block = block.number;
        self.details.base = base;

        let base_fee = block.base_fee;
        self.order.push_front(block.number);
        self.blocks.insert(block.number, Arc::new(block));

        if let Err(e) = self.hook.on_base_fee_changed(base_fee) {
            warn!("{e}");
        }

        InsertOutcome::Inserted
    }

    /// Point lookup by block number.
    pub fn get_block_stats(&self, number: u64) -> Option<&BlockRecord> {
        self.blocks.get(&number).map(Arc::as_ref)
    }

    /// Shared handle to a stored record.
    pub fn get_shared(&self, number: u64) -> Option<Arc<BlockRecord>> {
        self.blocks.get(&number).cloned()
    }

    pub fn contains(&self, number: u64) -> bool {
        self.blocks.contains_key(&number)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn details(&self) -> &ExplorerDetails {
        &self.details
    }

    pub fn session(&self) -> &SessionCounters {
        &self.session
    }

    /// Point-in-time copy of everything a reader may need. Block records are
    /// shared, so this copies pointers rather than records.
    pub fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot {
            details: self.details.clone(),
            session: self.session.clone(),
            blocks: self
                .order
                .iter()
                .filter_map(|number| self.blocks.get(number))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{error::HookError, payload::BaseData};
    use std::sync::Mutex;

    pub fn block(number: u64, base_fee: u64) -> BlockRecord {
        BlockRecord {
            number,
            timestamp: 1_630_000_000 + number * 12,
            burned: U256::from(base_fee) * U256::from(10_000_000u64),
            tips: U256::from(1_000_000_000u64),
            rewards: U256::from(2_000_000_000_000_000_000u128),
            base_fee: U256::from(base_fee),
            priority_fee: U256::from(1_500_000_000u64),
            gas_used: 12_000_000,
            gas_target: 15_000_000,
            transactions: number % 7 + 1,
            type2_transactions: 1,
        }
    }

    pub fn event(block: BlockRecord) -> BlockData {
        BlockData::new(
            block,
            BaseData {
                version: "1.0.0".to_owned(),
                ..Default::default()
            },
        )
    }

    fn empty_index() -> BlockIndex {
        BlockIndex::new(InitialData::default())
    }

    fn numbers(snapshot: &IndexSnapshot) -> Vec<u64> {
        snapshot.blocks.iter().map(|b| b.number).collect()
    }

    #[derive(Default)]
    struct RecordingHook {
        seen: Mutex<Vec<U256>>,
    }

    impl OnBaseFeeChanged for RecordingHook {
        fn on_base_fee_changed(&self, base_fee: U256) -> Result<(), HookError> {
            self.seen.lock().unwrap().push(base_fee);
            Ok(())
        }
    }

    struct FailingHook;

    impl OnBaseFeeChanged for FailingHook {
        fn on_base_fee_changed(&self, _base_fee: U256) -> Result<(), HookError> {
            Err(HookError::new("display went away"))
        }
    }

    #[test]
    fn bootstrap_seeds_current_pointers_from_newest_block() {
        let initial = InitialData {
            blocks: vec![block(102, 30), block(101, 20), block(100, 10)],
            block_number: 999,
            ..Default::default()
        };
        let index = BlockIndex::new(initial);
        let details = index.details();
        assert_eq!(details.current_block, 102);
        assert_eq!(details.current_base_fee, U256::from(30));
        assert_eq!(details.current_priority_fee, U256::from(1_500_000_000u64));
        assert_eq!(numbers(&index.snapshot()), vec![102, 101, 100]);

        // bootstrap blocks are history, not session activity
        assert_eq!(index.session().block_count, 0);
        assert!(index.session().burned.is_zero());
        assert!(index.session().min_base_fee.is_none());
    }

    #[test]
    fn bootstrap_without_blocks_uses_defaults() {
        let index = BlockIndex::new(InitialData {
            block_number: 55,
            ..Default::default()
        });
        assert_eq!(index.details().current_block, 55);
        assert!(index.details().current_base_fee.is_zero());
        assert!(index.details().current_priority_fee.is_zero());
        assert!(index.is_empty());
    }

    #[test]
    fn bootstrap_skips_repeated_blocks() {
        let index = BlockIndex::new(InitialData {
            blocks: vec![block(11, 1), block(10, 1), block(10, 9)],
            ..Default::default()
        });
        assert_eq!(numbers(&index.snapshot()), vec![11, 10]);
        assert_eq!(index.get_block_stats(10).unwrap().base_fee, U256::from(1));
    }

    #[test]
    fn inserts_prepend_newest_first() {
        let mut index = empty_index();
        for n in [100, 101, 102] {
            assert!(index.insert(event(block(n, 10))).is_inserted());
        }
        assert_eq!(numbers(&index.snapshot()), vec![102, 101, 100]);
        assert_eq!(index.details().current_block, 102);
    }

    #[test]
    fn duplicate_insert_changes_nothing() {
        let mut index = empty_index();
        index.insert(event(block(100, 10)));
        let before = index.snapshot();

        let mut altered = block(100, 99);
        altered.transactions = 1_000;
        altered.burned = U256::from(123_456u64);
        let mut dup = event(altered);
        dup.base.clients = 77;
        assert_eq!(index.insert(dup), InsertOutcome::Duplicate);

        let after = index.snapshot();
        assert_eq!(after.session, before.session);
        assert_eq!(after.blocks, before.blocks);
        assert_eq!(after.details, before.details);
        assert_eq!(index.get_block_stats(100).unwrap().base_fee, U256::from(10));
    }

    #[test]
    fn duplicate_of_bootstrap_block_is_ignored() {
        let mut index = BlockIndex::new(InitialData {
            blocks: vec![block(5, 1)],
            ..Default::default()
        });
        assert_eq!(index.insert(event(block(5, 2))), InsertOutcome::Duplicate);
        assert_eq!(index.session().block_count, 0);
    }

    #[test]
    fn counters_accumulate_over_distinct_blocks() {
        let mut index = empty_index();
        let blocks: Vec<_> = (1..=20).map(|n| block(n, n * 3)).collect();
        for b in &blocks {
            index.insert(event(b.clone()));
            // repeated delivery is harmless
            index.insert(event(b.clone()));
        }
        let session = index.session();
        assert_eq!(session.block_count, 20);
        assert_eq!(
            session.transaction_count,
            blocks.iter().map(|b| b.transactions).sum::<u64>()
        );
        let burned = blocks.iter().fold(U256::ZERO, |acc, b| acc + b.burned);
        assert_eq!(session.burned, burned);
        assert_eq!(session.tips, U256::from(20_000_000_000u64));
        assert_eq!(
            session.rewards,
            U256::from(40_000_000_000_000_000_000u128)
        );
    }

    #[test]
    fn tracks_min_and_max_base_fee() {
        let mut index = empty_index();
        for (n, fee) in [(1, 5), (2, 2), (3, 9), (4, 2)] {
            index.insert(event(block(n, fee)));
        }
        assert_eq!(index.session().min_base_fee, Some(U256::from(2)));
        assert_eq!(index.session().max_base_fee, Some(U256::from(9)));

        let mut reordered = empty_index();
        for (n, fee) in [(1, 9), (2, 2), (3, 2), (4, 5)] {
            reordered.insert(event(block(n, fee)));
        }
        assert_eq!(reordered.session().min_base_fee, Some(U256::from(2)));
        assert_eq!(reordered.session().max_base_fee, Some(U256::from(9)));
    }

    #[test]
    fn out_of_order_block_is_kept_in_arrival_order() {
        let mut index = empty_index();
        index.insert(event(block(10, 1)));
        index.insert(event(block(8, 2)));
        assert_eq!(numbers(&index.snapshot()), vec![8, 10]);
        assert_eq!(index.details().current_block, 8);
        assert_eq!(index.details().current_base_fee, U256::from(2));
    }

    #[test]
    fn accepted_block_replaces_window_totals() {
        let mut index = empty_index();
        let mut data = event(block(1, 1));
        data.base.clients = 3;
        data.base.usd_price = 2500.0;
        data.base.totals_day.id = "day".to_owned();
        index.insert(data);

        let details = index.details();
        assert_eq!(details.base.clients, 3);
        assert_eq!(details.base.usd_price, 2500.0);
        assert_eq!(details.base.totals_day.id, "day");
        assert_eq!(details.base.version, "1.0.0");
    }

    #[test]
    fn unknown_block_lookup_returns_none() {
        let mut index = empty_index();
        index.insert(event(block(1, 1)));
        assert!(index.get_block_stats(1).is_some());
        assert!(index.get_block_stats(2).is_none());
    }

    #[test]
    fn contains_tracks_accepted_numbers() {
        let mut index = empty_index();
        assert!(!index.contains(5));
        index.insert(event(block(5, 1)));
        assert!(index.contains(5));
        assert!(!index.contains(6));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn snapshots_share_records_with_the_index() {
        let mut index = empty_index();
        index.insert(event(block(1, 4)));
        let first = index.snapshot();
        index.insert(event(block(2, 5)));
        let second = index.snapshot();

        let stored = index.get_shared(1).unwrap();
        assert!(Arc::ptr_eq(&first.blocks[0], &stored));
        assert!(Arc::ptr_eq(&second.blocks[1], &stored));
        assert_eq!(second.latest().map(|b| b.number), Some(2));
        assert_eq!(first.latest().map(|b| b.number), Some(1));
    }

    #[test]
    fn snapshot_is_detached_from_index() {
        let mut index = empty_index();
        index.insert(event(block(1, 4)));

        let mut snapshot = index.snapshot();
        snapshot.blocks.clear();
        snapshot.session.block_count = 1_000;
        snapshot.details.current_block = 0;

        let fresh = index.snapshot();
        assert_eq!(numbers(&fresh), vec![1]);
        assert_eq!(fresh.session.block_count, 1);
        assert_eq!(fresh.details.current_block, 1);
    }

    #[test]
    fn hook_fires_once_per_accepted_block() {
        let hook = Arc::new(RecordingHook::default());
        let mut index = empty_index().with_hook(hook.clone());
        index.insert(event(block(1, 10)));
        index.insert(event(block(1, 10)));
        index.insert(event(block(2, 20)));
        assert_eq!(
            *hook.seen.lock().unwrap(),
            vec![U256::from(10), U256::from(20)]
        );
    }

    #[test]
    fn failing_hook_does_not_fail_insert() {
        let mut index = empty_index().with_hook(Arc::new(FailingHook));
        assert!(index.insert(event(block(1, 10))).is_inserted());
        assert_eq!(index.session().block_count, 1);
        assert_eq!(index.len(), 1);
    }
}
