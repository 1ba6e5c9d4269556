// Error types shared across the client

use thiserror::Error;

/// Errors from the external REST store.
///
/// `Unreachable` covers network-level failures where the request never
/// completed; `Rejected` carries the server's error payload verbatim so it
/// can be surfaced to the user unmodified.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request never completed: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("server rejected request ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

/// Errors raised while promoting a match result into a candidate and
/// application pair.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("failed to create candidate: {detail}")]
    CandidateCreationFailed { detail: String },

    #[error("failed to create application: {detail}")]
    ApplicationCreationFailed { detail: String },

    #[error("this candidate has already applied for this job")]
    DuplicateApplication,

    #[error("provisioning failed: {0}")]
    ProvisionFailed(String),
}

/// Errors from the matching flow itself.
///
/// `ValidationSkipped` means a client-side input guard blocked the action
/// before any network call was made.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("action skipped: {0}")]
    ValidationSkipped(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("skill extraction failed for {file}: {reason}")]
    Extraction { file: String, reason: String },
}
