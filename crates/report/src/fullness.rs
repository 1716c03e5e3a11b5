//! How often blocks run close to the gas limit, and for how long.

use alloy::primitives::U256;
use burnstats_core::BlockRecord;
use serde::Serialize;
use std::borrow::Borrow;

/// Share of the gas limit (twice the gas target) that a block consumed.
pub fn gas_used_percent_of_limit(block: &BlockRecord) -> f64 {
    let limit = block.gas_limit();
    if limit == 0 {
        return 0.0;
    }
    block.gas_used as f64 / limit as f64 * 100.0
}

/// Running total with bounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RangeStats {
    pub total: U256,
    pub min: U256,
    pub max: U256,
}

impl RangeStats {
    fn new(value: U256) -> Self {
        Self {
            total: value,
            min: value,
            max: value,
        }
    }

    fn add(&mut self, value: U256) {
        self.total = self.total.saturating_add(value);
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Integer mean over `count` samples.
    pub fn average(&self, count: u64) -> U256 {
        self.total
            .checked_div(U256::from(count))
            .unwrap_or_default()
    }
}

/// A run of consecutive full blocks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub start_block: u64,
    pub end_block: u64,
    pub blocks: u64,
    pub rewards: RangeStats,
    pub burned: RangeStats,
    pub tips: RangeStats,
    pub base_fee: RangeStats,
    pub priority_fee: RangeStats,
    pub transactions: u64,
    pub type2_transactions: u64,
}

impl Streak {
    fn start(block: &BlockRecord) -> Self {
        Self {
            start_block: block.number,
            end_block: block.number,
            blocks: 1,
            rewards: RangeStats::new(block.rewards),
            burned: RangeStats::new(block.burned),
            tips: RangeStats::new(block.tips),
            base_fee: RangeStats::new(block.base_fee),
            priority_fee: RangeStats::new(block.priority_fee),
            transactions: block.transactions,
            type2_transactions: block.type2_transactions,
        }
    }

    fn extend(&mut self, block: &BlockRecord) {
        self.end_block = block.number;
        self.blocks += 1;
        self.rewards.add(block.rewards);
        self.burned.add(block.burned);
        self.tips.add(block.tips);
        self.base_fee.add(block.base_fee);
        self.priority_fee.add(block.priority_fee);
        self.transactions += block.transactions;
        self.type2_transactions += block.type2_transactions;
    }

    pub fn type2_percent(&self) -> f64 {
        percent(self.type2_transactions as usize, self.transactions as usize)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullnessReport {
    /// Blocks using more than this percentage of the gas limit count as full.
    pub threshold: u8,
    pub total_blocks: usize,
    pub full_blocks: usize,
    /// Full blocks that belong to a streak of at least `min_streak` blocks.
    pub consecutive_full_blocks: usize,
    pub min_streak: usize,
    pub record_streak: Option<Streak>,
}

impl FullnessReport {
    pub fn full_percent(&self) -> f64 {
        percent(self.full_blocks, self.total_blocks)
    }

    pub fn consecutive_percent(&self) -> f64 {
        percent(self.consecutive_full_blocks, self.total_blocks)
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Scans `blocks` (newest first, as held by the index) for full-block streaks.
///
/// A gap in block numbers ends a streak.
pub fn analyze_fullness<B: Borrow<BlockRecord>>(
    blocks: &[B],
    threshold: u8,
    min_streak: usize,
) -> FullnessReport {
    let mut report = FullnessReport {
        threshold,
        total_blocks: blocks.len(),
        full_blocks: 0,
        consecutive_full_blocks: 0,
        min_streak,
        record_streak: None,
    };
    let mut current: Option<Streak> = None;

    for block in blocks.iter().rev() {
        let block: &BlockRecord = block.borrow();
        let is_full = gas_used_percent_of_limit(block) > f64::from(threshold);
        let contiguous = current
            .as_ref()
            .is_some_and(|s| s.end_block.checked_add(1) == Some(block.number));

        if !is_full || !contiguous {
            close_streak(&mut report, current.take());
        }
        if is_full {
            report.full_blocks += 1;
            match current.as_mut() {
                Some(streak) => streak.extend(block),
                None => current = Some(Streak::start(block)),
            }
        }
    }
    close_streak(&mut report, current);

    report
}

fn close_streak(report: &mut FullnessReport, streak: Option<Streak>) {
    let Some(streak) = streak else {
        return;
    };
    if streak.blocks as usize >= report.min_streak {
        report.consecutive_full_blocks += streak.blocks as usize;
    }
    let longer = report
        .record_streak
        .as_ref()
        .map_or(true, |record| streak.blocks > record.blocks);
    if longer {
        report.record_streak = Some(streak);
    }
}
