use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("event source error: {0}")]
    Source(String),

    #[error("index actor is no longer running")]
    SessionClosed,

    #[error("session halted after a protocol version mismatch; reload required")]
    SessionHalted,

    #[error("io error")]
    Io(#[from] std::io::Error),

    #[error("failed to decode payload")]
    Json(#[from] serde_json::Error),

    #[error("stale client: expected protocol version {expected}, received {received}")]
    VersionMismatch { expected: String, received: String },
}

impl Error {
    pub fn is_version_mismatch(&self) -> bool {
        matches!(self, Error::VersionMismatch { .. } | Error::SessionHalted)
    }
}

/// Failure reported by a notification hook. Never propagated out of the index.
#[derive(Debug, Error)]
#[error("notification hook failed: {0}")]
pub struct HookError(pub String);

impl HookError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}
