//! TikTok adapter
//!
//! Passes the source URL through and always asks for the HD variant.

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

/// TikTok adapter
pub struct TikTokAdapter;

impl TikTokAdapter {
    /// Create a new TikTok adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for TikTokAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformAdapter for TikTokAdapter {
    fn name(&self) -> &'static str {
        "tiktok"
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::Tiktok
    }

    async fn fetch(
        &self,
        request: &MediaRequest,
        ctx: &AdapterContext<'_>,
    ) -> Result<RawUpstreamResponse, UpstreamError> {
        let endpoint = &ctx.config.tiktok;
        let url = endpoint_url(endpoint, &[("url", request.source_url.as_str()), ("hd", "1")])?;
        debug!(adapter = self.name(), host = %endpoint.host, "Calling upstream");

        let request = ctx
            .client
            .get(url)
            .headers(rapidapi_headers(endpoint, ctx.api_key)?);
        let body = send_json(self.name(), request).await?;

        check_provider_code(&body)?;
        Ok(RawUpstreamResponse {
            shape: ResponseShape::Tiktok,
            body,
        })
    }
}

/// Provider signals failures with a non-zero `code` and no `data`
fn check_provider_code(body: &Value) -> Result<(), UpstreamError> {
    let code = body.get("code").and_then(Value::as_i64).unwrap_or(0);
    let has_data = body.get("data").is_some_and(Value::is_object);
    if code != 0 && !has_data {
        return Err(UpstreamError::Request(format!(
            "provider returned code {}",
            code
        )));
    }
    Ok(())
}
