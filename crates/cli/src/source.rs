//! Replays a recorded feed: one bootstrap JSON document plus an optional
//! newline-delimited file of block events.

use async_trait::async_trait;
use burnstats_core::{
    payload::{BlockData, InitialData},
    source::EventSource,
    Error, Result,
};
use std::path::Path;
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, BufReader, Lines},
};
use tracing::{debug, info};

pub struct FileEventSource {
    initial: Option<InitialData>,
    events: Option<Lines<BufReader<File>>>,
    line: usize,
}

impl FileEventSource {
    pub async fn open(bootstrap: impl AsRef<Path>, events: Option<&Path>) -> Result<Self> {
        let bootstrap = bootstrap.as_ref();
        let contents = tokio::fs::read(bootstrap).await?;
        let initial: InitialData = serde_json::from_slice(&contents)?;
        info!(
            "loaded bootstrap from {} ({} blocks, version {})",
            bootstrap.display(),
            initial.blocks.len(),
            initial.base.version
        );

        let events = match events {
            Some(path) => Some(BufReader::new(File::open(path).await?).lines()),
            None => None,
        };

        Ok(Self {
            initial: Some(initial),
            events,
            line: 0,
        })
    }
}

#[async_trait]
impl EventSource for FileEventSource {
    async fn initial_data(&mut self, max_blocks: usize) -> Result<InitialData> {
        let mut initial = self
            .initial
            .take()
            .ok_or_else(|| Error::Source("bootstrap payload already consumed".to_owned()))?;
        initial.blocks.truncate(max_blocks);
        Ok(initial)
    }

    async fn next_block(&mut self) -> Result<Option<BlockData>> {
        let Some(lines) = self.events.as_mut() else {
            return Ok(None);
        };
        while let Some(line) = lines.next_line().await? {
            self.line += 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let data: BlockData = serde_json::from_str(line)
                .map_err(|e| Error::Source(format!("events line {}: {e}", self.line)))?;
            debug!("read block {} from line {}", data.block.number, self.line);
            return Ok(Some(data));
        }
        Ok(None)
    }
}
