use super::SessionCounters;
use crate::{block::BlockRecord, payload::BaseData};
use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Latest-block pointers plus the pass-through metadata of the last event.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerDetails {
    #[serde(flatten)]
    pub base: BaseData,
    pub current_block: u64,
    pub current_base_fee: U256,
    pub current_priority_fee: U256,
}

/// Owned, point-in-time view of a [`super::BlockIndex`].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct IndexSnapshot {
    pub details: ExplorerDetails,
    pub session: SessionCounters,
    /// Known blocks, newest first.
    pub blocks: Vec<Arc<BlockRecord>>,
}

impl IndexSnapshot {
    pub fn latest(&self) -> Option<&BlockRecord> {
        self.blocks.first().map(Arc::as_ref)
    }

    pub fn get_block_stats(&self, number: u64) -> Option<&BlockRecord> {
        self.blocks
            .iter()
            .find(|b| b.number == number)
            .map(Arc::as_ref)
    }
}
