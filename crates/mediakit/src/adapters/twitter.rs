//! Twitter adapter
//!
//! The provider nests media under an array. The first element is lifted to
//! `primaryMedia` so the normalizer can address it with a fixed pointer; an
//! empty or missing array yields `primaryMedia: null`.

use crate::adapters::{
    endpoint_url, rapidapi_headers, send_json, AdapterContext, PlatformAdapter,
    RawUpstreamResponse,
};
use crate::error::UpstreamError;
use crate::normalize::ResponseShape;
use crate::types::{Endpoint, MediaRequest};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Key the selected media entry is stored under
pub const PRIMARY_MEDIA_KEY: &str = "primaryMedia";

/// Twitter / X adapter
pub struct TwitterAdapter;

impl TwitterAdapter {
    /// Create a new Twitter adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for TwitterAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformAdapter for TwitterAdapter {
    fn name(&self) -> &'static str {
        "twitter"
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::Twitter
    }

    async fn fetch(
        &self,
        request: &MediaRequest,
        ctx: &AdapterContext<'_>,
    ) -> Result<RawUpstreamResponse, UpstreamError> {
        let endpoint = &ctx.config.twitter;
        let url = endpoint_url(endpoint, &[("url", request.source_url.as_str())])?;
        debug!(adapter = self.name(), host = %endpoint.host, "Calling upstream");

        let request = ctx
            .client
            .get(url)
            .headers(rapidapi_headers(endpoint, ctx.api_key)?);
        let body = send_json(self.name(), request).await?;

        Ok(RawUpstreamResponse {
            shape: ResponseShape::Twitter,
            body: select_primary_media(body),
        })
    }
}

/// Lift `media[0]` to `primaryMedia`
fn select_primary_media(mut body: Value) -> Value {
    let primary = body
        .get("media")
        .and_then(Value::as_array)
        .and_then(|media| media.first())
        .cloned();

    if primary.is_none() {
        debug!("No media found in tweet");
    }

    if let Some(obj) = body.as_object_mut() {
        obj.insert(
            PRIMARY_MEDIA_KEY.to_string(),
            primary.unwrap_or(Value::Null),
        );
    }
    body
}
