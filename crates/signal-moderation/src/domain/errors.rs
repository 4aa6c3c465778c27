//! Moderation error types.

use signal_store::StoreError;

/// Moderation error type.
///
/// Every failure is per-request and recoverable by the caller correcting
/// input or retrying; nothing here is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    /// The submission payload failed validation.
    #[error("invalid submission: {0}")]
    Validation(String),

    /// No pending signal carries the requested id.
    #[error("signal not found: {0}")]
    NotFound(String),

    /// A collection write failed; the transition is not durable.
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),
}
