//! YouTube adapter
//!
//! Two unrelated providers share this adapter: audio requests go to an
//! mp3 conversion API, everything else to a video details API. Both take a
//! video id rather than the source URL.

use crate::adapters::{
    endpoint_url, rapidapi_headers, send_json, AdapterContext, PlatformAdapter,
    RawUpstreamResponse,
};
use crate::error::UpstreamError;
use crate::extract::extract_id;
use crate::normalize::ResponseShape;
use crate::types::{Endpoint, MediaRequest, MediaType};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// YouTube adapter (video details or mp3 audio)
pub struct YouTubeAdapter;

impl YouTubeAdapter {
    /// Create a new YouTube adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for YouTubeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformAdapter for YouTubeAdapter {
    fn name(&self) -> &'static str {
        "youtube"
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::Youtube
    }

    async fn fetch(
        &self,
        request: &MediaRequest,
        ctx: &AdapterContext<'_>,
    ) -> Result<RawUpstreamResponse, UpstreamError> {
        let video_id = extract_id(&request.source_url);
        if video_id.is_empty() {
            // Sent as-is; the provider rejects it
            debug!(url = %request.source_url, "No video id found in URL");
        }

        let media_type = request.effective_media_type();
        let (endpoint, param, shape) = match media_type {
            MediaType::Audio => (&ctx.config.youtube_audio, "id", ResponseShape::YoutubeAudio),
            MediaType::Video => (
                &ctx.config.youtube_video,
                "videoId",
                ResponseShape::YoutubeVideo,
            ),
        };

        let url = endpoint_url(endpoint, &[(param, video_id.as_str())])?;
        debug!(adapter = self.name(), host = %endpoint.host, %media_type, "Calling upstream");

        let request = ctx
            .client
            .get(url)
            .headers(rapidapi_headers(endpoint, ctx.api_key)?);
        let body = send_json(self.name(), request).await?;

        check_provider_status(&body)?;
        Ok(RawUpstreamResponse {
            shape,
            body: with_thumbnail(body, &video_id),
        })
    }
}

/// Both providers answer 200 with a failure flag for unknown ids
fn check_provider_status(body: &Value) -> Result<(), UpstreamError> {
    let failed = match body.get("status") {
        Some(Value::Bool(ok)) => !ok,
        Some(Value::String(status)) => status.eq_ignore_ascii_case("fail"),
        _ => false,
    };
    if failed {
        return Err(UpstreamError::Request(
            "provider reported a failed lookup".to_string(),
        ));
    }
    Ok(())
}

/// Fill in the standard thumbnail URL when the provider omits one
fn with_thumbnail(mut body: Value, video_id: &str) -> Value {
    if video_id.is_empty() {
        return body;
    }
    if let Some(obj) = body.as_object_mut() {
        obj.entry("thumbnail").or_insert_with(|| {
            Value::String(format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video_id))
        });
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_provider_status() {
        assert!(check_provider_status(&json!({"status": true})).is_ok());
        assert!(check_provider_status(&json!({"status": "ok"})).is_ok());
        assert!(check_provider_status(&json!({"title": "x"})).is_ok());
        assert!(check_provider_status(&json!({"status": false, "errorId": "VideoNotFound"})).is_err());
        assert!(check_provider_status(&json!({"status": "fail", "msg": "invalid id"})).is_err());
    }

    #[test]
    fn test_with_thumbnail() {
        let body = with_thumbnail(json!({"title": "x"}), "abc123");
        assert_eq!(body["thumbnail"], "https://i.ytimg.com/vi/abc123/hqdefault.jpg");

        let body = with_thumbnail(json!({"thumbnail": "https://keep.me"}), "abc123");
        assert_eq!(body["thumbnail"], "https://keep.me");

        let body = with_thumbnail(json!({"title": "x"}), "");
        assert!(body.get("thumbnail").is_none());
    }
}
