use super::{IndexHandle, Session, VersionGate};
use crate::{
    error::Error, hook::OnBaseFeeChanged, index::IndexSnapshot, source::EventSource, Result,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct SessionOptions {
    /// Protocol version this client understands.
    pub expected_version: String,
    /// Size of the bootstrap window requested from the source.
    pub max_blocks: usize,
}

/// Why a session stopped ingesting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The source has no more events.
    Exhausted,
    Cancelled,
    /// The source speaks a different protocol version; the client must reload.
    Stale { expected: String, received: String },
}

#[derive(Clone, Debug)]
pub struct SessionReport {
    pub end: SessionEnd,
    /// Last published snapshot; `None` when the bootstrap itself was refused.
    pub snapshot: Option<Arc<IndexSnapshot>>,
    pub accepted: u64,
    pub duplicates: u64,
}

/// Bootstraps a session from `source` and feeds it every subsequent event until
/// the source runs dry, `cancel` fires, or a version mismatch halts ingestion.
pub async fn run_session<S: EventSource + ?Sized>(
    source: &mut S,
    options: &SessionOptions,
    hook: Arc<dyn OnBaseFeeChanged>,
    cancel: CancellationToken,
) -> Result<SessionReport> {
    let gate = VersionGate::new(options.expected_version.clone());
    let initial = source.initial_data(options.max_blocks).await?;
    let session = match Session::bootstrap(initial, gate, hook) {
        Ok(session) => session,
        Err(Error::VersionMismatch { expected, received }) => {
            return Ok(SessionReport {
                end: SessionEnd::Stale { expected, received },
                snapshot: None,
                accepted: 0,
                duplicates: 0,
            });
        }
        Err(e) => return Err(e),
    };

    let handle = IndexHandle::spawn(session);
    let mut accepted = 0;
    let mut duplicates = 0;

    let end = loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => break SessionEnd::Cancelled,
            next = source.next_block() => next?,
        };
        let Some(data) = next else {
            break SessionEnd::Exhausted;
        };
        match handle.insert(data).await {
            Ok(outcome) if outcome.is_inserted() => accepted += 1,
            Ok(_) => duplicates += 1,
            Err(Error::VersionMismatch { expected, received }) => {
                warn!("new protocol version {received} available, please reload");
                break SessionEnd::Stale { expected, received };
            }
            Err(e) => return Err(e),
        }
    };

    let snapshot = handle.snapshot();
    handle.stop().await?;
    info!("session ended ({end:?}): {accepted} blocks accepted, {duplicates} repeats ignored");

    Ok(SessionReport {
        end,
        snapshot: Some(snapshot),
        accepted,
        duplicates,
    })
}
