use thiserror::Error;

/// Top-level error type for the simdash client.
#[derive(Debug, Error)]
pub enum DashError {
    #[error("backend gateway error: {0}")]
    Gateway(String),

    #[error("unexpected payload: {0}")]
    Payload(String),

    #[error("no experiment selected")]
    NoSelection,

    #[error("feed channel closed: {0}")]
    ChannelClosed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
