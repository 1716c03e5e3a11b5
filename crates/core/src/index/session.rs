use crate::block::BlockRecord;
use alloy::primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Running totals for the blocks observed by one index instance.
///
/// Cumulative fields only grow. The base fee bounds are unset until the first
/// block arrives and then only tighten (min) or widen (max).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCounters {
    pub burned: U256,
    pub tips: U256,
    pub rewards: U256,
    pub block_count: u64,
    pub transaction_count: u64,
    pub min_base_fee: Option<U256>,
    pub max_base_fee: Option<U256>,
    pub since: DateTime<Utc>,
}

impl SessionCounters {
    pub fn new(since: DateTime<Utc>) -> Self {
        Self {
            burned: U256::ZERO,
            tips: U256::ZERO,
            rewards: U256::ZERO,
            block_count: 0,
            transaction_count: 0,
            min_base_fee: None,
            max_base_fee: None,
            since,
        }
    }

    pub(crate) fn record(&mut self, block: &BlockRecord) {
        if !block.burned.is_zero() {
            self.burned = self.burned.saturating_add(block.burned);
        }
        if !block.tips.is_zero() {
            self.tips = self.tips.saturating_add(block.tips);
        }
        if !block.rewards.is_zero() {
            self.rewards = self.rewards.saturating_add(block.rewards);
        }

        self.block_count += 1;
        self.transaction_count = self.transaction_count.saturating_add(block.transactions);

        self.min_base_fee = Some(
            self.min_base_fee
                .map_or(block.base_fee, |min| min.min(block.base_fee)),
        );
        self.max_base_fee = Some(
            self.max_base_fee
                .map_or(block.base_fee, |max| max.max(block.base_fee)),
        );
    }

    /// Mean transactions per observed block, or zero before the first block.
    pub fn transactions_per_block(&self) -> f64 {
        if self.block_count == 0 {
            return 0.0;
        }
        self.transaction_count as f64 / self.block_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_block_sets_both_bounds() {
        let mut session = SessionCounters::new(Utc::now());
        let block = BlockRecord {
            number: 1,
            base_fee: U256::from(17),
            transactions: 4,
            ..Default::default()
        };
        session.record(&block);
        assert_eq!(session.min_base_fee, Some(U256::from(17)));
        assert_eq!(session.max_base_fee, Some(U256::from(17)));
        assert_eq!(session.transactions_per_block(), 4.0);
    }

    #[test]
    fn zero_amounts_leave_totals_untouched() {
        let mut session = SessionCounters::new(Utc::now());
        session.record(&BlockRecord {
            number: 1,
            ..Default::default()
        });
        assert!(session.burned.is_zero());
        assert!(session.rewards.is_zero());
        assert_eq!(session.block_count, 1);
        assert_eq!(session.min_base_fee, Some(U256::ZERO));
    }
}
