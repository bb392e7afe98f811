//! MediaKit - media metadata gateway
//!
//! Accepts a source URL (YouTube, TikTok, Twitter or anything else), calls
//! the matching third-party provider and normalizes its JSON into one
//! [`MediaRecord`] schema. Without a configured credential, or in
//! development mode, deterministic fixture records are served instead.
//!
//! ## Pipeline
//!
//! caller → [`Gateway`] → ([`fallback`] | [`PlatformAdapter`] → provider)
//! → [`normalize`] → `{"success": true, "data": ...}`
//!
//! Built-in adapters:
//! - [`YouTubeAdapter`] - video details or mp3 audio, keyed by video id
//! - [`TikTokAdapter`] - HD variant lookup by URL
//! - [`TwitterAdapter`] - tweet media lookup by URL
//! - [`UniversalAdapter`] - all-in-one provider with a platform hint

pub mod adapters;
pub mod config;
mod error;
pub mod extract;
pub mod fallback;
mod gateway;
pub mod normalize;
pub mod server;
mod types;

pub use adapters::{
    AdapterRegistry, PlatformAdapter, RawUpstreamResponse, TikTokAdapter, TwitterAdapter,
    UniversalAdapter, YouTubeAdapter,
};
pub use config::{AdapterConfig, GatewayConfig, Mode, ProviderEndpoint, ServerConfig};
pub use error::{ConfigurationError, GatewayError, UpstreamError, UPSTREAM_ERROR_MESSAGE};
pub use extract::extract_id;
pub use gateway::{FallbackReason, Gateway, GatewayBuilder, Route};
pub use normalize::normalize;
pub use types::{
    ApiResponse, Endpoint, Engagement, ErrorBody, FormatEntry, MediaRecord, MediaRequest,
    MediaType, Platform,
};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "MediaKit/1.0";

/// JSON Schema of the request body accepted by every endpoint
pub fn request_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(MediaRequest);
    serde_json::to_value(schema).unwrap_or_default()
}

/// JSON Schema of the `data` field of a successful response
pub fn record_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(MediaRecord);
    serde_json::to_value(schema).unwrap_or_default()
}
