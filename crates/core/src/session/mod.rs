//! Version-gated ownership of one [`BlockIndex`] per event-source connection.
//!
//! A session never transitions back to active: once a payload with an
//! unexpected protocol version is seen the session is stale and must be
//! replaced by bootstrapping a new one.

mod actor;
mod runner;

pub use actor::IndexHandle;
pub use runner::{run_session, SessionEnd, SessionOptions, SessionReport};

use crate::{
    error::Error,
    hook::OnBaseFeeChanged,
    index::{BlockIndex, InsertOutcome},
    payload::{BlockData, InitialData},
    Result,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Compares inbound protocol versions against the one this client understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionGate {
    expected: String,
}

impl VersionGate {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn check(&self, version: &str) -> Result<()> {
        if version != self.expected {
            return Err(Error::VersionMismatch {
                expected: self.expected.clone(),
                received: version.to_owned(),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Stale { received: String },
}

#[derive(Debug)]
pub struct Session {
    index: BlockIndex,
    gate: VersionGate,
    state: SessionState,
}

impl Session {
    /// Validates the bootstrap payload and builds a fresh index from it.
    pub fn bootstrap(
        initial: InitialData,
        gate: VersionGate,
        hook: Arc<dyn OnBaseFeeChanged>,
    ) -> Result<Self> {
        if let Err(e) = gate.check(&initial.base.version) {
            warn!("refusing bootstrap payload: {e}");
            return Err(e);
        }
        info!(
            "bootstrapping session with {} blocks (protocol {})",
            initial.blocks.len(),
            gate.expected()
        );
        Ok(Self {
            index: BlockIndex::new(initial).with_hook(hook),
            gate,
            state: SessionState::Active,
        })
    }

    /// Feeds one block event into the index unless the session has gone stale.
    pub fn on_block(&mut self, data: BlockData) -> Result<InsertOutcome> {
        if let SessionState::Stale { .. } = self.state {
            return Err(Error::SessionHalted);
        }
        if let Err(e) = self.gate.check(&data.base.version) {
            warn!("halting session at block {}: {e}", data.block.number);
            self.state = SessionState::Stale {
                received: data.base.version,
            };
            return Err(e);
        }
        Ok(self.index.insert(data))
    }

    pub fn index(&self) -> &BlockIndex {
        &self.index
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_stale(&self) -> bool {
        matches!(self.state, SessionState::Stale { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hook::NilHook,
        index::tests::{block, event},
        payload::BaseData,
    };

    fn initial(version: &str) -> InitialData {
        InitialData {
            blocks: vec![block(10, 1)],
            base: BaseData {
                version: version.to_owned(),
                ..Default::default()
            },
            block_number: 10,
        }
    }

    #[test]
    fn gate_accepts_only_expected_version() {
        let gate = VersionGate::new("1.0.0");
        assert!(gate.check("1.0.0").is_ok());
        let err = gate.check("1.1.0").unwrap_err();
        assert!(err.is_version_mismatch());
    }

    #[test]
    fn bootstrap_with_wrong_version_is_refused() {
        let res = Session::bootstrap(
            initial("0.9.0"),
            VersionGate::new("1.0.0"),
            Arc::new(NilHook),
        );
        assert!(matches!(res, Err(Error::VersionMismatch { .. })));
    }

    #[test]
    fn mismatch_halts_all_further_ingestion() {
        let mut session =
            Session::bootstrap(initial("1.0.0"), VersionGate::new("1.0.0"), Arc::new(NilHook))
                .unwrap();
        assert!(session.on_block(event(block(11, 1))).unwrap().is_inserted());

        let mut newer = event(block(12, 1));
        newer.base.version = "2.0.0".to_owned();
        assert!(matches!(
            session.on_block(newer),
            Err(Error::VersionMismatch { .. })
        ));
        assert_eq!(
            session.state(),
            &SessionState::Stale {
                received: "2.0.0".to_owned()
            }
        );

        // even a correctly versioned event is refused now
        assert!(matches!(
            session.on_block(event(block(13, 1))),
            Err(Error::SessionHalted)
        ));
        assert_eq!(session.index().len(), 2);
        assert_eq!(session.index().session().block_count, 1);
        assert!(session.index().get_block_stats(12).is_none());
    }
}
