use async_trait::async_trait;
use thiserror::Error;

use crate::{Segment, VideoId};

/// A caption track advertised for a video
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionTrack {
    pub language_code: String,
    pub name: String,
    pub base_url: String,
    pub is_generated: bool,
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("No transcript found for video {video_id} in language {language}")]
    NoTranscriptFound { video_id: String, language: String },

    #[error("Subtitles are disabled for video {video_id}")]
    TranscriptsDisabled { video_id: String },

    #[error("Video unavailable: {reason}")]
    VideoUnavailable { video_id: String, reason: String },

    #[error("YouTube is blocking requests from your IP (video {video_id})")]
    RequestBlocked { video_id: String },

    #[error("429 Too Many Requests")]
    TooManyRequests,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse caption data: {0}")]
    Parse(String),

    #[error("{0}")]
    Upstream(String),
}

impl ProviderError {
    /// True when the video simply has no captions matching the request
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            ProviderError::NoTranscriptFound { .. } | ProviderError::TranscriptsDisabled { .. }
        )
    }
}

/// Source of caption tracks and caption text for a video
#[async_trait]
pub trait CaptionProvider: Send + Sync {
    /// List caption tracks in the provider's preferred order
    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>, ProviderError>;

    /// Download and parse the segments of one track
    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<Segment>, ProviderError>;

    /// Fetch captions for `video_id` in exactly `language`
    async fn fetch(&self, video_id: &VideoId, language: &str) -> Result<Vec<Segment>, ProviderError> {
        let tracks = self.list_tracks(video_id).await?;
        let track = find_track(&tracks, language).ok_or_else(|| ProviderError::NoTranscriptFound {
            video_id: video_id.to_string(),
            language: language.to_string(),
        })?;
        self.fetch_track(track).await
    }

    /// Provider name for logs
    fn name(&self) -> &str;
}

/// Find the track for `language`, preferring manually created over generated
pub fn find_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Option<&'a CaptionTrack> {
    tracks
        .iter()
        .filter(|t| t.language_code == language)
        .min_by_key(|t| t.is_generated)
}
