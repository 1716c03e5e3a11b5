use crate::{
    payload::{BlockData, InitialData},
    Result,
};
use async_trait::async_trait;
use std::collections::VecDeque;

/// Delivers already-decoded payloads from a live feed.
#[async_trait]
pub trait EventSource: Send {
    /// Bootstrap payload holding at most `max_blocks` recent blocks, newest first.
    async fn initial_data(&mut self, max_blocks: usize) -> Result<InitialData>;

    /// Next block event, or `None` once the feed is exhausted.
    async fn next_block(&mut self) -> Result<Option<BlockData>>;
}

/// In-memory source, mostly useful for tests and replays.
#[derive(Clone, Debug, Default)]
pub struct VecEventSource {
    initial: InitialData,
    events: VecDeque<BlockData>,
}

impl VecEventSource {
    pub fn new(initial: InitialData, events: impl IntoIterator<Item = BlockData>) -> Self {
        Self {
            initial,
            events: events.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

#[async_trait]
impl EventSource for VecEventSource {
    async fn initial_data(&mut self, max_blocks: usize) -> Result<InitialData> {
        let mut initial = self.initial.clone();
        initial.blocks.truncate(max_blocks);
        Ok(initial)
    }

    async fn next_block(&mut self) -> Result<Option<BlockData>> {
        Ok(self.events.pop_front())
    }
}
