//! Core types for MediaKit

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Platform family a source URL belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Platform {
    /// youtube.com / youtu.be
    Youtube,
    /// tiktok.com
    Tiktok,
    /// twitter.com / x.com
    Twitter,
    /// Anything else, served by the universal provider
    #[default]
    Generic,
}

impl Platform {
    /// Lowercase identifier used on the wire and in records
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::Twitter => "twitter",
            Platform::Generic => "generic",
        }
    }
}

impl FromStr for Platform {
    type Err = Infallible;

    /// Unrecognized hints resolve to [`Platform::Generic`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "youtube" | "yt" => Platform::Youtube,
            "tiktok" => Platform::Tiktok,
            "twitter" | "x" => Platform::Twitter,
            _ => Platform::Generic,
        })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let Ok(platform) = raw.parse::<Platform>();
        Ok(platform)
    }
}

/// Requested media flavor (YouTube only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaType {
    #[default]
    Video,
    Audio,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Video => "video",
            MediaType::Audio => "audio",
        }
    }
}

impl FromStr for MediaType {
    type Err = Infallible;

    /// Only `audio` selects audio; everything else is video
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("audio") {
            Ok(MediaType::Audio)
        } else {
            Ok(MediaType::Video)
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MediaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MediaType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let Ok(media_type) = raw.parse::<MediaType>();
        Ok(media_type)
    }
}

/// Gateway entry point; one per HTTP endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Youtube,
    Tiktok,
    Twitter,
    /// Accepts an explicit platform hint
    Universal,
}

impl Endpoint {
    /// All endpoints, in route registration order
    pub const ALL: [Endpoint; 4] = [
        Endpoint::Youtube,
        Endpoint::Tiktok,
        Endpoint::Twitter,
        Endpoint::Universal,
    ];

    /// Identifier used for logging and adapter lookup
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Youtube => "youtube",
            Endpoint::Tiktok => "tiktok",
            Endpoint::Twitter => "twitter",
            Endpoint::Universal => "universal",
        }
    }

    /// HTTP route served for this endpoint
    pub fn route(&self) -> &'static str {
        match self {
            Endpoint::Youtube => "/api/youtube-download",
            Endpoint::Tiktok => "/api/tiktok-download",
            Endpoint::Twitter => "/api/twitter-download",
            Endpoint::Universal => "/api/all-media-download",
        }
    }

    /// Platform a request resolves to on this endpoint
    ///
    /// Fixed for the platform endpoints; the universal endpoint uses the
    /// caller's hint and defaults to [`Platform::Generic`].
    pub fn resolve_platform(&self, request: &MediaRequest) -> Platform {
        match self {
            Endpoint::Youtube => Platform::Youtube,
            Endpoint::Tiktok => Platform::Tiktok,
            Endpoint::Twitter => Platform::Twitter,
            Endpoint::Universal => request.platform_hint.unwrap_or_default(),
        }
    }
}

impl FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "youtube" => Ok(Endpoint::Youtube),
            "tiktok" => Ok(Endpoint::Tiktok),
            "twitter" => Ok(Endpoint::Twitter),
            "universal" | "all" => Ok(Endpoint::Universal),
            _ => Err("Invalid endpoint: must be youtube, tiktok, twitter or universal".to_string()),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Caller input for every endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MediaRequest {
    /// Source media URL (required)
    #[serde(rename = "url", default)]
    pub source_url: String,

    /// Platform hint, honored by the universal endpoint
    #[serde(rename = "platform", default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub platform_hint: Option<Platform>,

    /// `video` or `audio`, honored by the YouTube endpoint
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub media_type: Option<MediaType>,
}

impl MediaRequest {
    /// Create a new request for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            source_url: url.into(),
            ..Default::default()
        }
    }

    /// Set the platform hint
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform_hint = Some(platform);
        self
    }

    /// Set the media type
    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    /// Get the effective media type (default video)
    pub fn effective_media_type(&self) -> MediaType {
        self.media_type.unwrap_or_default()
    }
}

/// Engagement counters as display strings (`"1.2M"`, `"532"`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Engagement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retweets: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<String>,
}

/// One downloadable variant offered by the universal provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormatEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub quality: String,
    pub container: String,
    pub size_label: String,
}

impl FormatEntry {
    pub fn new(kind: &str, quality: &str, container: &str, size_label: &str) -> Self {
        Self {
            kind: kind.to_string(),
            quality: quality.to_string(),
            container: container.to_string(),
            size_label: size_label.to_string(),
        }
    }
}

/// Canonical media description returned by every endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    pub title: String,

    pub author: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    /// Opaque display string; upstream duration formats are not unified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,

    pub engagement: Engagement,

    pub platform: String,

    /// Platform-specific fields, flattened into the record
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MediaRecord {
    /// Insert a platform-specific field
    pub fn with_extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

/// Success envelope: `{"success": true, "data": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Failure envelope: `{"error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
