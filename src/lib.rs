pub mod config;
pub mod error;
pub mod metadata;
pub mod output;
pub mod provider;
pub mod server;
pub mod transcript;
pub mod youtube;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub use error::TranscriptError;

/// A single captioned segment, offsets in seconds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub start: f64,
    pub duration: f64,
    pub text: String,
}

/// Opaque YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Wrap an identifier without validating it (the CLI takes IDs verbatim)
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/hqdefault.jpg", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)").unwrap()
});

static BARE_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([a-zA-Z0-9_-]{11})$").unwrap());

/// Extract video ID from a watch, short or embed URL, or a bare 11-character ID
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    let input = input.trim();

    [&*URL_PATTERN, &*BARE_ID_PATTERN]
        .into_iter()
        .find_map(|re| re.captures(input))
        .map(|caps| VideoId::new(&caps[1]))
}
