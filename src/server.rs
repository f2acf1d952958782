use std::net::SocketAddr;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use eyre::{Result, WrapErr};
use log::{info, warn};
use serde::Serialize;
use serde_json::{Map, Value};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::metadata::{MetadataFetcher, VideoInfo};
use crate::output::{TimestampedSegment, timestamped};
use crate::transcript::TranscriptResolver;
use crate::{TranscriptError, VideoId, extract_video_id};

/// Per-process handles shared by every request; neither holds request state
#[derive(Clone)]
pub struct AppState {
    pub resolver: TranscriptResolver,
    pub metadata: MetadataFetcher,
}

/// Pull `url` out of a JSON object body; a missing key reads as empty
pub fn request_url(body: &[u8]) -> std::result::Result<String, String> {
    let request: Map<String, Value> = serde_json::from_slice(body).map_err(|e| e.to_string())?;
    match request.get("url") {
        None => Ok(String::new()),
        Some(Value::String(url)) => Ok(url.clone()),
        Some(other) => Err(format!("expected url to be a string, got {other}")),
    }
}

#[derive(Debug, Serialize)]
pub struct TranscriptData {
    #[serde(rename = "videoId")]
    pub video_id: VideoId,
    pub title: String,
    pub thumbnail: String,
    pub author: String,
    pub transcript: Vec<TimestampedSegment>,
}

#[derive(Debug, Serialize)]
pub struct VideoInfoData {
    #[serde(rename = "videoId")]
    pub video_id: VideoId,
    #[serde(flatten)]
    pub info: VideoInfo,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub success: bool,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

type ApiResult<T> = Result<Json<SuccessResponse<T>>, (StatusCode, Json<ErrorResponse>)>;

fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(SuccessResponse { success: true, data }))
}

fn failure(status: StatusCode, error: impl ToString) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: error.to_string(),
        }),
    )
}

fn status_for(error: &TranscriptError) -> StatusCode {
    match error {
        TranscriptError::InvalidUrl | TranscriptError::MissingVideoId => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health).post(transcript).options(preflight))
        .route(
            "/api/video-info/{video_id}",
            get(video_info).post(transcript).options(preflight),
        )
        .route("/", post(transcript).options(preflight))
        .route("/{*path}", post(transcript).options(preflight))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .with_state(state)
}

pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("failed to bind {addr}"))?;
    info!("Listening on {addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn video_info(State(state): State<AppState>, Path(video_id): Path<String>) -> ApiResult<VideoInfoData> {
    let video_id = VideoId::new(video_id);
    let info = state.metadata.fetch(&video_id).await;
    ok(VideoInfoData { video_id, info })
}

async fn transcript(State(state): State<AppState>, body: Bytes) -> ApiResult<TranscriptData> {
    let url = request_url(&body).map_err(|e| {
        warn!("Rejecting request body: {e}");
        failure(StatusCode::INTERNAL_SERVER_ERROR, e)
    })?;

    let video_id = extract_video_id(&url).ok_or_else(|| {
        let e = TranscriptError::InvalidUrl;
        failure(status_for(&e), e)
    })?;
    info!("Transcript requested for {video_id}");

    let info = state.metadata.fetch(&video_id).await;

    let segments = state
        .resolver
        .resolve(&video_id)
        .await
        .map_err(|e| failure(status_for(&e), e))?;

    ok(TranscriptData {
        video_id,
        title: info.title,
        thumbnail: info.thumbnail,
        author: info.author,
        transcript: timestamped(&segments),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_from_object() {
        assert_eq!(request_url(br#"{"url": "https://youtu.be/x"}"#).unwrap(), "https://youtu.be/x");
        assert_eq!(request_url(b"{}").unwrap(), "");
    }

    #[test]
    fn test_request_url_rejects_non_objects() {
        assert!(request_url(br#"["https://youtu.be/dQw4w9WgXcQ"]"#).is_err());
        assert!(request_url(b"[]").is_err());
        assert!(request_url(b"\"https://youtu.be/dQw4w9WgXcQ\"").is_err());
        assert!(request_url(b"").is_err());
    }

    #[test]
    fn test_request_url_rejects_non_string_url() {
        assert!(request_url(br#"{"url": null}"#).is_err());
        assert!(request_url(br#"{"url": 42}"#).is_err());
    }
}
