//! Universal adapter
//!
//! Forwards the source URL and platform hint to an all-in-one provider whose
//! response is already close to the canonical record.

use crate::adapters::{
    endpoint_url, rapidapi_headers, send_json, AdapterContext, PlatformAdapter,
    RawUpstreamResponse,
};
use crate::error::UpstreamError;
use crate::normalize::ResponseShape;
use crate::types::{Endpoint, MediaRequest};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

/// Universal (any platform) adapter
pub struct UniversalAdapter;

impl UniversalAdapter {
    /// Create a new universal adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for UniversalAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformAdapter for UniversalAdapter {
    fn name(&self) -> &'static str {
        "universal"
    }

    fn endpoint(&self) -> Endpoint {
        Endpoint::Universal
    }

    async fn fetch(
        &self,
        request: &MediaRequest,
        ctx: &AdapterContext<'_>,
    ) -> Result<RawUpstreamResponse, UpstreamError> {
        let endpoint = &ctx.config.universal;
        let url = endpoint_url(endpoint, &[])?;
        debug!(adapter = self.name(), host = %endpoint.host, "Calling upstream");

        let request = ctx
            .client
            .post(url)
            .headers(rapidapi_headers(endpoint, ctx.api_key)?)
            .json(&request_body(request));
        let body = send_json(self.name(), request).await?;

        if body.get("error").and_then(Value::as_bool) == Some(true) {
            return Err(UpstreamError::Request(
                "provider reported an error".to_string(),
            ));
        }

        Ok(RawUpstreamResponse {
            shape: ResponseShape::Universal,
            body,
        })
    }
}

fn request_body(request: &MediaRequest) -> Value {
    match request.platform_hint {
        Some(platform) => json!({"url": request.source_url, "platform": platform.as_str()}),
        None => json!({"url": request.source_url}),
    }
}
