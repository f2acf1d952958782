use thiserror::Error;

/// Shown when YouTube appears to be rate-limiting or blocking the caller
pub const BLOCKED_MESSAGE: &str =
    "Your IP has been blocked by YouTube. Please try again later or use a VPN to change your IP address.";

/// Failures surfaced to callers in the `error` field of a response
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("Invalid YouTube URL")]
    InvalidUrl,

    #[error("Video ID required")]
    MissingVideoId,

    #[error("No transcript available for this video")]
    NoTranscriptAvailable,

    #[error("{}", BLOCKED_MESSAGE)]
    UpstreamBlocked,

    #[error("{0}")]
    Upstream(String),
}

impl TranscriptError {
    /// Classify a provider failure message into a caller-facing error
    pub fn from_upstream(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if message.contains("IP") || lower.contains("blocked") || lower.contains("too many requests") {
            TranscriptError::UpstreamBlocked
        } else {
            TranscriptError::Upstream(message)
        }
    }
}
