use crate::{
    chart::gas_used_percent,
    time::{absolute_time, time_since},
    units::auto_format,
};
use burnstats_core::BlockRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Borrow;

/// One row of the live blocks table.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRow {
    pub number: u64,
    pub burned: String,
    pub tips: String,
    pub rewards: String,
    pub base_fee: String,
    pub priority_fee: String,
    pub gas_used: u64,
    /// Gas used as a whole percentage of the gas target.
    pub gas_used_percent: u64,
    pub transactions: u64,
    /// Share of type-2 (EIP-1559) transactions as a whole percentage.
    pub type2_percent: u64,
    pub time: String,
    pub age: String,
}

impl BlockRow {
    pub fn new(block: &BlockRecord, now: DateTime<Utc>) -> Self {
        let type2_percent = if block.transactions == 0 {
            0
        } else {
            (block.type2_transactions as f64 / block.transactions as f64 * 100.0).round() as u64
        };

        Self {
            number: block.number,
            burned: auto_format(block.burned).to_string(),
            tips: auto_format(block.tips).to_string(),
            rewards: auto_format(block.rewards).to_string(),
            base_fee: auto_format(block.base_fee).to_string(),
            priority_fee: auto_format(block.priority_fee).to_string(),
            gas_used: block.gas_used,
            gas_used_percent: gas_used_percent(block).round() as u64,
            transactions: block.transactions,
            type2_percent,
            time: absolute_time(block.timestamp),
            age: time_since(block.timestamp, now),
        }
    }
}

/// Newest-first rows for at most `max_rows` blocks.
pub fn block_rows<B: Borrow<BlockRecord>>(
    blocks: &[B],
    max_rows: usize,
    now: DateTime<Utc>,
) -> Vec<BlockRow> {
    blocks
        .iter()
        .take(max_rows)
        .map(|block| BlockRow::new(block.borrow(), now))
        .collect()
}
