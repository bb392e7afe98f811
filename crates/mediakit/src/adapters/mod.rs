//! Platform adapters for upstream media providers
//!
//! Design: each adapter knows one provider family. It builds the upstream
//! request and shapes the raw body for the normalizer. AdapterRegistry maps
//! every gateway endpoint to its adapter.

mod tiktok;
mod twitter;
mod universal;
mod youtube;

pub use tiktok::TikTokAdapter;
pub use twitter::TwitterAdapter;
pub use universal::UniversalAdapter;
pub use youtube::YouTubeAdapter;

use crate::config::{AdapterConfig, ProviderEndpoint};
use crate::error::UpstreamError;
use crate::normalize::ResponseShape;
use crate::types::{Endpoint, MediaRequest};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use serde_json::Value;
use url::Url;

/// Header carrying the RapidAPI key
pub const RAPIDAPI_KEY_HEADER: &str = "x-rapidapi-key";

/// Header carrying the RapidAPI host identifier
pub const RAPIDAPI_HOST_HEADER: &str = "x-rapidapi-host";

/// Provider body plus the contract it follows
#[derive(Debug, Clone, PartialEq)]
pub struct RawUpstreamResponse {
    pub shape: ResponseShape,
    pub body: Value,
}

/// Everything an adapter needs for one upstream call
///
/// The key lives here only for header construction; adapters never log it.
pub struct AdapterContext<'a> {
    pub client: &'a reqwest::Client,
    pub config: &'a AdapterConfig,
    pub api_key: &'a str,
}

/// Trait for upstream provider adapters
///
/// Implementations make exactly one upstream call per `fetch()` and never
/// retry.
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    /// Unique identifier for this adapter (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Gateway endpoint served by this adapter
    fn endpoint(&self) -> Endpoint;

    /// Call the provider and return its shaped body
    ///
    /// Fails with [`UpstreamError`] on transport errors, non-2xx statuses and
    /// bodies that are not JSON.
    async fn fetch(
        &self,
        request: &MediaRequest,
        ctx: &AdapterContext<'_>,
    ) -> Result<RawUpstreamResponse, UpstreamError>;
}

/// Registry mapping endpoints to adapters
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn PlatformAdapter>>,
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            adapters: Vec::new(),
        }
    }

    /// Create a registry with one adapter per endpoint
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(YouTubeAdapter::new()));
        registry.register(Box::new(TikTokAdapter::new()));
        registry.register(Box::new(TwitterAdapter::new()));
        registry.register(Box::new(UniversalAdapter::new()));
        registry
    }

    /// Register an adapter, replacing any adapter for the same endpoint
    pub fn register(&mut self, adapter: Box<dyn PlatformAdapter>) {
        self.adapters.retain(|a| a.endpoint() != adapter.endpoint());
        self.adapters.push(adapter);
    }

    /// Adapter serving the given endpoint
    pub fn get(&self, endpoint: Endpoint) -> Option<&dyn PlatformAdapter> {
        self.adapters
            .iter()
            .find(|a| a.endpoint() == endpoint)
            .map(|a| a.as_ref())
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

/// RapidAPI authentication headers for a provider
pub(crate) fn rapidapi_headers(
    endpoint: &ProviderEndpoint,
    api_key: &str,
) -> Result<HeaderMap, UpstreamError> {
    let mut headers = HeaderMap::new();
    let key = HeaderValue::from_str(api_key)
        .map_err(|_| UpstreamError::Request("credential is not a valid header value".to_string()))?;
    let host = HeaderValue::from_str(&endpoint.host)
        .map_err(|_| UpstreamError::Request("invalid upstream host".to_string()))?;

    headers.insert(HeaderName::from_static(RAPIDAPI_KEY_HEADER), key);
    headers.insert(HeaderName::from_static(RAPIDAPI_HOST_HEADER), host);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Provider URL with query parameters appended
pub(crate) fn endpoint_url(
    endpoint: &ProviderEndpoint,
    query: &[(&str, &str)],
) -> Result<Url, UpstreamError> {
    let mut url = Url::parse(&endpoint.url())
        .map_err(|e| UpstreamError::Request(format!("invalid upstream URL: {}", e)))?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

/// Send a prepared request and parse the JSON body
pub(crate) async fn send_json(
    adapter: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<Value, UpstreamError> {
    let response = request.send().await.map_err(UpstreamError::from_reqwest)?;

    let status = response.status();
    if !status.is_success() {
        // Provider payload is dropped
        tracing::debug!(adapter, status = status.as_u16(), "Upstream returned error status");
        return Err(UpstreamError::Status(status.as_u16()));
    }

    let bytes = response.bytes().await.map_err(UpstreamError::from_reqwest)?;
    serde_json::from_slice(&bytes).map_err(|e| UpstreamError::InvalidBody(e.to_string()))
}
