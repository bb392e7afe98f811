//! Gateway dispatcher
//!
//! Single entry point for every endpoint: validate, pick fixture data or an
//! upstream adapter, normalize, and convert failures to [`GatewayError`].

use crate::adapters::{AdapterContext, AdapterRegistry, PlatformAdapter};
use crate::config::{GatewayConfig, Mode};
use crate::error::{ConfigurationError, GatewayError, UpstreamError};
use crate::fallback;
use crate::normalize::normalize;
use crate::types::{Endpoint, MediaRecord, MediaRequest, Platform};
use crate::DEFAULT_USER_AGENT;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Why a request is answered from fixtures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Process runs in development mode
    Mode,
    /// Upstream cannot be authenticated
    Configuration(ConfigurationError),
}

/// Outcome of route selection for one request
#[derive(Clone, PartialEq, Eq)]
pub enum Route<'a> {
    Fallback(FallbackReason),
    Upstream { api_key: &'a str },
}

impl fmt::Debug for Route<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Fallback(reason) => f.debug_tuple("Fallback").field(reason).finish(),
            Route::Upstream { .. } => f
                .debug_struct("Upstream")
                .field("api_key", &"<redacted>")
                .finish(),
        }
    }
}

/// Builder for configuring a [`Gateway`]
pub struct GatewayBuilder {
    config: GatewayConfig,
    user_agent: Option<String>,
    registry: AdapterRegistry,
}

impl Default for GatewayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GatewayBuilder {
    /// Create a builder with default config and all built-in adapters
    pub fn new() -> Self {
        Self {
            config: GatewayConfig::default(),
            user_agent: None,
            registry: AdapterRegistry::with_defaults(),
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    /// Set process mode
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the shared upstream credential
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.adapters = self.config.adapters.with_api_key(key);
        self
    }

    /// Send every provider request to one base URL
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.config.adapters = self.config.adapters.with_base_url(base_url);
        self
    }

    /// Set the upstream request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Register an adapter, replacing the built-in one for its endpoint
    pub fn adapter(mut self, adapter: Box<dyn PlatformAdapter>) -> Self {
        self.registry.register(adapter);
        self
    }

    /// Build the gateway and its shared HTTP client
    pub fn build(self) -> Result<Gateway, UpstreamError> {
        let mut headers = HeaderMap::new();
        let user_agent = self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );

        // One pooled client for all requests; the timeout bounds every upstream call
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(self.config.timeout)
            .timeout(self.config.timeout)
            .build()
            .map_err(UpstreamError::ClientBuild)?;

        Ok(Gateway {
            config: self.config,
            client,
            registry: self.registry,
        })
    }
}

/// Media gateway: config, pooled HTTP client and adapters
///
/// Holds no per-request state; share it behind an `Arc`.
pub struct Gateway {
    config: GatewayConfig,
    client: reqwest::Client,
    registry: AdapterRegistry,
}

impl Gateway {
    /// Create a gateway with the given config and built-in adapters
    pub fn new(config: GatewayConfig) -> Result<Self, UpstreamError> {
        GatewayBuilder::new().config(config).build()
    }

    /// Create a new gateway builder
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::new()
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// True when requests may reach upstream providers
    pub fn upstream_enabled(&self) -> bool {
        !self.config.forces_fallback() && self.config.adapters.has_credential()
    }

    /// Decide between fixtures and an upstream call for `platform`
    pub fn route(&self, platform: Platform) -> Route<'_> {
        if self.config.forces_fallback() {
            return Route::Fallback(FallbackReason::Mode);
        }
        match self.config.adapters.credential(platform) {
            Ok(api_key) => Route::Upstream { api_key },
            Err(err) => Route::Fallback(FallbackReason::Configuration(err)),
        }
    }

    /// Handle one request on `endpoint`
    ///
    /// Makes at most one upstream call. Fixture responses never fail.
    pub async fn handle(
        &self,
        endpoint: Endpoint,
        request: MediaRequest,
    ) -> Result<MediaRecord, GatewayError> {
        if request.source_url.trim().is_empty() {
            return Err(GatewayError::missing_url());
        }

        let platform = endpoint.resolve_platform(&request);
        let api_key = match self.route(platform) {
            Route::Upstream { api_key } => api_key,
            Route::Fallback(FallbackReason::Mode) => {
                debug!(%endpoint, "Development mode, serving fixture data");
                return Ok(fallback::provide(endpoint, &request));
            }
            Route::Fallback(FallbackReason::Configuration(err)) => {
                warn!(%endpoint, error = %err, "Serving fixture data");
                return Ok(fallback::provide(endpoint, &request));
            }
        };

        let adapter = self.registry.get(endpoint).ok_or_else(|| {
            UpstreamError::Request(format!("No adapter registered for {}", endpoint))
        })?;
        debug!(%endpoint, adapter = adapter.name(), "Using adapter");

        let ctx = AdapterContext {
            client: &self.client,
            config: &self.config.adapters,
            api_key,
        };
        let raw = adapter.fetch(&request, &ctx).await?;

        info!(%endpoint, platform = %platform, "Fetched media metadata");
        Ok(normalize(&raw, platform.as_str(), &request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::RawUpstreamResponse;
    use crate::fallback::YOUTUBE_AUDIO_TITLE;
    use crate::normalize::ResponseShape;
    use crate::types::MediaType;

    #[test]
    fn test_route_without_credential() {
        let gateway = Gateway::builder().build().unwrap();
        assert_eq!(
            gateway.route(Platform::Twitter),
            Route::Fallback(FallbackReason::Configuration(
                ConfigurationError::MissingCredential(Platform::Twitter)
            ))
        );
        assert!(!gateway.upstream_enabled());
    }

    #[test]
    fn test_route_development_mode_wins_over_credential() {
        let gateway = Gateway::builder()
            .api_key("key")
            .mode(Mode::Development)
            .build()
            .unwrap();
        assert_eq!(
            gateway.route(Platform::Youtube),
            Route::Fallback(FallbackReason::Mode)
        );
    }

    #[test]
    fn test_route_with_credential() {
        let gateway = Gateway::builder().api_key("key").build().unwrap();
        assert_eq!(
            gateway.route(Platform::Tiktok),
            Route::Upstream { api_key: "key" }
        );
        assert!(gateway.upstream_enabled());
    }

    #[test]
    fn test_route_debug_redacts_credential() {
        let gateway = Gateway::builder()
            .api_key("super-secret-key")
            .build()
            .unwrap();
        let route = gateway.route(Platform::Youtube);
        let printed = format!("{:?}", route);
        assert!(!printed.contains("super-secret-key"));
        assert!(printed.contains("Upstream"));
    }

    #[test]
    fn test_fallback_reason_is_cloneable() {
        let gateway = Gateway::builder().build().unwrap();
        let Route::Fallback(reason) = gateway.route(Platform::Generic) else {
            panic!("expected fallback without credential");
        };
        assert_eq!(reason.clone(), reason);
        assert!(format!("{:?}", reason).contains("MissingCredential"));
    }

    struct StubAdapter;

    #[async_trait::async_trait]
    impl PlatformAdapter for StubAdapter {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn endpoint(&self) -> Endpoint {
            Endpoint::Tiktok
        }

        async fn fetch(
            &self,
            request: &MediaRequest,
            ctx: &AdapterContext<'_>,
        ) -> Result<RawUpstreamResponse, UpstreamError> {
            assert_eq!(ctx.api_key, "key");
            Ok(RawUpstreamResponse {
                shape: ResponseShape::Tiktok,
                body: serde_json::json!({"data": {"title": format!("stub for {}", request.source_url)}}),
            })
        }
    }

    #[tokio::test]
    async fn test_registered_adapter_replaces_builtin() {
        let gateway = Gateway::builder()
            .api_key("key")
            .adapter(Box::new(StubAdapter))
            .build()
            .unwrap();
        let record = gateway
            .handle(Endpoint::Tiktok, MediaRequest::new("https://www.tiktok.com/@a/video/1"))
            .await
            .unwrap();
        assert_eq!(record.title, "stub for https://www.tiktok.com/@a/video/1");
        assert_eq!(record.platform, "tiktok");
    }

    #[tokio::test]
    async fn test_empty_url_rejected_in_every_configuration() {
        let gateways = [
            Gateway::builder().build().unwrap(),
            Gateway::builder().api_key("key").build().unwrap(),
            Gateway::builder().mode(Mode::Development).build().unwrap(),
        ];
        for gateway in &gateways {
            for endpoint in Endpoint::ALL {
                for url in ["", "   "] {
                    let result = gateway.handle(endpoint, MediaRequest::new(url)).await;
                    assert!(matches!(result, Err(GatewayError::Validation(_))));
                }
            }
        }
    }

    #[tokio::test]
    async fn test_fallback_without_credential() {
        let gateway = Gateway::builder().build().unwrap();
        let request = MediaRequest::new("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .media_type(MediaType::Audio);
        let record = gateway.handle(Endpoint::Youtube, request).await.unwrap();
        assert_eq!(record.title, YOUTUBE_AUDIO_TITLE);
        assert_eq!(record.extra["quality"], "320kbps");
    }
}
