// Snapshot source port for the polling pipeline
use crate::domain::telemetry::TelemetrySnapshot;
use async_trait::async_trait;
use thiserror::Error;

/// Why a cycle could not produce a snapshot. Every variant is recovered by
/// skipping the cycle and leaving the last rendered state in place; none of
/// them escapes the polling loop.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("service responded with status {0}")]
    Status(u16),
    #[error("malformed snapshot: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the latest telemetry window. At most `limit` rows are requested;
    /// `subject` narrows the window server-side when set (the client performs
    /// no filtering of its own). One request per call, no internal retry.
    async fn fetch_snapshot(
        &self,
        limit: usize,
        subject: Option<&str>,
    ) -> Result<TelemetrySnapshot, FetchError>;
}
