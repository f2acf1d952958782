use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::VideoId;

pub const OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Title, author and thumbnail for a video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoInfo {
    pub title: String,
    pub author: String,
    pub thumbnail: String,
}

impl VideoInfo {
    pub fn defaults(video_id: &VideoId) -> Self {
        VideoInfo {
            title: format!("Video {video_id}"),
            author: "Unknown".to_string(),
            thumbnail: video_id.thumbnail_url(),
        }
    }
}

#[derive(Error, Debug)]
enum MetadataError {
    #[error("metadata unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
    author_name: Option<String>,
}

/// Looks up video metadata through an oEmbed endpoint
#[derive(Debug, Clone)]
pub struct MetadataFetcher {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl Default for MetadataFetcher {
    fn default() -> Self {
        Self::new(reqwest::Client::new(), OEMBED_ENDPOINT, DEFAULT_TIMEOUT)
    }
}

impl MetadataFetcher {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Never fails; missing fields and failed lookups fall back to defaults
    pub async fn fetch(&self, video_id: &VideoId) -> VideoInfo {
        let defaults = VideoInfo::defaults(video_id);

        match self.lookup(video_id).await {
            Ok(resp) => {
                debug!("oEmbed lookup succeeded for {video_id}");
                VideoInfo {
                    title: resp.title.unwrap_or(defaults.title),
                    author: resp.author_name.unwrap_or(defaults.author),
                    thumbnail: defaults.thumbnail,
                }
            }
            Err(e) => {
                warn!("Using default metadata for {video_id}: {e}");
                defaults
            }
        }
    }

    async fn lookup(&self, video_id: &VideoId) -> Result<OEmbedResponse, MetadataError> {
        let watch_url = video_id.watch_url();
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("url", watch_url.as_str()), ("format", "json")])
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp)
    }
}
