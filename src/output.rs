use serde::Serialize;

use crate::transcript::TranscriptResolver;
use crate::{Segment, TranscriptError, VideoId};

/// Segment shape exposed over HTTP, start formatted as `HH:MM:SS.mmm`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimestampedSegment {
    pub timestamp: String,
    pub text: String,
    pub duration: f64,
}

impl From<&Segment> for TimestampedSegment {
    fn from(segment: &Segment) -> Self {
        TimestampedSegment {
            timestamp: format_timestamp(segment.start),
            text: segment.text.clone(),
            duration: segment.duration,
        }
    }
}

/// Format an offset in seconds as `HH:MM:SS.mmm`, truncating to the millisecond
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };

    // Drop float noise below a microsecond so 59.999 stays .999 rather than .998
    let micros = (seconds * 1_000_000.0).round() as u64;
    let total_ms = micros / 1_000;

    let hours = total_ms / 3_600_000;
    let minutes = total_ms % 3_600_000 / 60_000;
    let secs = total_ms % 60_000 / 1_000;
    let ms = total_ms % 1_000;

    format!("{hours:02}:{minutes:02}:{secs:02}.{ms:03}")
}

pub fn timestamped(segments: &[Segment]) -> Vec<TimestampedSegment> {
    segments.iter().map(TimestampedSegment::from).collect()
}

/// Command-line output: raw start offsets rather than formatted timestamps
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CliOutput<'a> {
    Success { success: bool, transcript: &'a [Segment] },
    Failure { success: bool, error: String },
}

impl<'a> CliOutput<'a> {
    pub fn from_result(result: &'a Result<Vec<Segment>, TranscriptError>) -> Self {
        match result {
            Ok(segments) => CliOutput::Success {
                success: true,
                transcript: segments,
            },
            Err(e) => CliOutput::failure(e),
        }
    }

    pub fn failure(error: &TranscriptError) -> Self {
        CliOutput::Failure {
            success: false,
            error: error.to_string(),
        }
    }
}

/// Render as a single JSON line, non-ASCII left unescaped
pub fn render_json(output: &CliOutput<'_>) -> String {
    serde_json::to_string(output).unwrap_or_else(|e| format!(r#"{{"success":false,"error":"{e}"}}"#))
}

/// Run one command-line lookup; returns the JSON line and the exit code.
///
/// Only a missing ID exits non-zero; resolution failures are reported in-band.
pub async fn run_cli(video_id: Option<String>, resolver: &TranscriptResolver) -> (String, i32) {
    let Some(video_id) = video_id else {
        return (render_json(&CliOutput::failure(&TranscriptError::MissingVideoId)), 1);
    };

    let result = resolver.resolve(&VideoId::new(video_id)).await;
    (render_json(&CliOutput::from_result(&result)), 0)
}
