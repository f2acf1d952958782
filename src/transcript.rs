use std::sync::Arc;

use log::{debug, info, warn};

use crate::provider::{CaptionProvider, ProviderError};
use crate::{Segment, TranscriptError, VideoId};

/// Languages tried, in order, before falling back to any available track
pub const DEFAULT_LANGUAGES: [&str; 2] = ["vi", "en"];

/// Outcome of asking the provider for one preferred language
#[derive(Debug)]
pub enum LanguageAttempt {
    Found(Vec<Segment>),
    /// The video has no captions in this language
    Missing(ProviderError),
    /// Anything else went wrong; still moves on to the next language
    Failed(ProviderError),
}

impl From<Result<Vec<Segment>, ProviderError>> for LanguageAttempt {
    fn from(result: Result<Vec<Segment>, ProviderError>) -> Self {
        match result {
            Ok(segments) => LanguageAttempt::Found(segments),
            Err(e) if e.is_missing() => LanguageAttempt::Missing(e),
            Err(e) => LanguageAttempt::Failed(e),
        }
    }
}

/// Resolves a transcript with language-preference fallback
#[derive(Clone)]
pub struct TranscriptResolver {
    provider: Arc<dyn CaptionProvider>,
    languages: Vec<String>,
}

impl TranscriptResolver {
    pub fn new(provider: Arc<dyn CaptionProvider>) -> Self {
        Self::with_languages(provider, DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect())
    }

    pub fn with_languages(provider: Arc<dyn CaptionProvider>, languages: Vec<String>) -> Self {
        Self { provider, languages }
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub async fn attempt(&self, video_id: &VideoId, language: &str) -> LanguageAttempt {
        self.provider.fetch(video_id, language).await.into()
    }

    pub async fn resolve(&self, video_id: &VideoId) -> Result<Vec<Segment>, TranscriptError> {
        for language in &self.languages {
            match self.attempt(video_id, language).await {
                LanguageAttempt::Found(segments) => {
                    info!("Resolved {video_id} in {language}: {} segments", segments.len());
                    return Ok(segments);
                }
                LanguageAttempt::Missing(e) => debug!("No {language} captions for {video_id}: {e}"),
                LanguageAttempt::Failed(e) => {
                    warn!("{} failed fetching {language} captions for {video_id}: {e}", self.provider.name())
                }
            }
        }

        match self.resolve_any(video_id).await {
            Ok(Some(segments)) => Ok(segments),
            Ok(None) => Err(TranscriptError::NoTranscriptAvailable),
            Err(e) => {
                warn!("Transcript resolution failed for {video_id}: {e}");
                Err(TranscriptError::from_upstream(e.to_string()))
            }
        }
    }

    /// Fetch the first track the provider lists, if any
    async fn resolve_any(&self, video_id: &VideoId) -> Result<Option<Vec<Segment>>, ProviderError> {
        let tracks = self.provider.list_tracks(video_id).await?;
        let Some(track) = tracks.first() else {
            return Ok(None);
        };

        info!(
            "Falling back to {} ({}) captions for {video_id}",
            track.name, track.language_code
        );
        self.provider.fetch_track(track).await.map(Some)
    }
}
