use thiserror::Error;

/// Caller-side context mistakes. Detected locally, before any network call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// An operation needs a selection (identity, school or diary) that was
    /// never made.
    #[error("context not resolved: {0} has not been selected")]
    Unresolved(&'static str),

    /// The diary/semester pair is not present in the last resolved
    /// semester list.
    #[error("unknown diary: diary {diary_id} / semester {semester_id} is not in the resolved semester list")]
    UnknownDiary { diary_id: String, semester_id: i32 },
}

/// Failures coming out of a [`RawDataSource`](crate::source::RawDataSource).
///
/// Surfaced unchanged to the caller; the core never retries or falls back.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network or HTTP-level failure.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The source returned data that does not match the expected structure.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SourceError::UnexpectedShape(e.to_string())
        } else {
            SourceError::Transport(e.to_string())
        }
    }
}

/// Device pairing misuse, detected locally where the expiry window allows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PairingError {
    /// No pairing token has been issued yet.
    #[error("no pairing in progress: request a pairing token first")]
    NotIssued,

    /// The pairing token was already consumed by a device registration.
    #[error("pairing token already consumed by a previous registration")]
    AlreadyConsumed,

    /// The pairing token passed its validity window before being consumed.
    #[error("pairing token expired")]
    Expired,
}

/// Umbrella error for the public client surface.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Pairing(#[from] PairingError),
}

impl ClientError {
    /// True when the failure was detected locally, i.e. the caller never
    /// paid a network round-trip for it.
    pub fn is_local(&self) -> bool {
        !matches!(self, ClientError::Source(_))
    }
}
