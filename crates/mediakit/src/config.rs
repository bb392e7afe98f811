//! Gateway configuration loaded once at startup
//!
//! Everything here is immutable after construction. The upstream credential
//! is shared by all adapters; when it is absent the dispatcher serves
//! fixture data instead of calling a provider.

use crate::error::ConfigurationError;
use crate::types::Platform;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable holding the shared RapidAPI key
pub const ENV_API_KEY: &str = "RAPIDAPI_KEY";

/// Environment variable selecting production or development mode
pub const ENV_MODE: &str = "MEDIAKIT_MODE";

/// Environment variable overriding the upstream timeout (seconds)
pub const ENV_TIMEOUT: &str = "MEDIAKIT_TIMEOUT_SECS";

/// Default upstream request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Process mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Call upstream providers when a credential is present
    #[default]
    Production,
    /// Always serve fixtures
    Development,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Production => "production",
            Mode::Development => "development",
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Mode::Production),
            "development" | "dev" | "demo" | "test" => Ok(Mode::Development),
            _ => Err(ConfigurationError::InvalidValue {
                key: ENV_MODE.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// One upstream provider: RapidAPI host identifier plus request URL parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoint {
    /// Value for the `x-rapidapi-host` header
    pub host: String,
    /// Scheme and authority requests are sent to
    pub base_url: String,
    /// Request path on the provider
    pub path: String,
}

impl ProviderEndpoint {
    /// Endpoint served directly by its RapidAPI host
    pub fn rapidapi(host: &str, path: &str) -> Self {
        Self {
            host: host.to_string(),
            base_url: format!("https://{}", host),
            path: path.to_string(),
        }
    }

    /// Replace the base URL, keeping host header and path
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full request URL without query parameters
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.path)
    }
}

/// Static adapter configuration: credential and one endpoint per provider
#[derive(Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    api_key: Option<String>,
    pub youtube_video: ProviderEndpoint,
    pub youtube_audio: ProviderEndpoint,
    pub tiktok: ProviderEndpoint,
    pub twitter: ProviderEndpoint,
    pub universal: ProviderEndpoint,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            youtube_video: ProviderEndpoint::rapidapi(
                "youtube-media-downloader.p.rapidapi.com",
                "/v2/video/details",
            ),
            youtube_audio: ProviderEndpoint::rapidapi("youtube-mp36.p.rapidapi.com", "/dl"),
            tiktok: ProviderEndpoint::rapidapi("tiktok-video-no-watermark2.p.rapidapi.com", "/"),
            twitter: ProviderEndpoint::rapidapi(
                "twitter-downloader-download-twitter-videos-gifs-and-images.p.rapidapi.com",
                "/status",
            ),
            universal: ProviderEndpoint::rapidapi(
                "social-download-all-in-one.p.rapidapi.com",
                "/v1/social/autolink",
            ),
        }
    }
}

impl AdapterConfig {
    /// Set the shared credential; empty keys count as absent
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = if key.trim().is_empty() { None } else { Some(key) };
        self
    }

    /// Point every provider at one base URL (mock servers, proxies)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        for endpoint in self.endpoints_mut() {
            endpoint.base_url = base_url.to_string();
        }
        self
    }

    /// Credential for the given platform
    pub fn credential(&self, platform: Platform) -> Result<&str, ConfigurationError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigurationError::MissingCredential(platform))
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoints_mut(&mut self) -> [&mut ProviderEndpoint; 5] {
        [
            &mut self.youtube_video,
            &mut self.youtube_audio,
            &mut self.tiktok,
            &mut self.twitter,
            &mut self.universal,
        ]
    }
}

impl fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("youtube_video", &self.youtube_video)
            .field("youtube_audio", &self.youtube_audio)
            .field("tiktok", &self.tiktok)
            .field("twitter", &self.twitter)
            .field("universal", &self.universal)
            .finish()
    }
}

/// Full gateway configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub mode: Mode,
    pub adapters: AdapterConfig,
    /// Bound on every upstream call
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            adapters: AdapterConfig::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup(ENV_MODE) {
            Some(value) => value.parse::<Mode>()?,
            None => Mode::default(),
        };

        let timeout = match lookup(ENV_TIMEOUT) {
            Some(value) => parse_timeout(&value)?,
            None => DEFAULT_TIMEOUT,
        };

        let mut adapters = AdapterConfig::default();
        if let Some(key) = lookup(ENV_API_KEY) {
            adapters = adapters.with_api_key(key);
        }

        let overrides: [(&str, &mut ProviderEndpoint); 5] = [
            ("MEDIAKIT_YOUTUBE_VIDEO_BASE_URL", &mut adapters.youtube_video),
            ("MEDIAKIT_YOUTUBE_AUDIO_BASE_URL", &mut adapters.youtube_audio),
            ("MEDIAKIT_TIKTOK_BASE_URL", &mut adapters.tiktok),
            ("MEDIAKIT_TWITTER_BASE_URL", &mut adapters.twitter),
            ("MEDIAKIT_UNIVERSAL_BASE_URL", &mut adapters.universal),
        ];
        for (key, endpoint) in overrides {
            if let Some(base_url) = lookup(key) {
                url::Url::parse(&base_url).map_err(|_| ConfigurationError::InvalidValue {
                    key: key.to_string(),
                    value: base_url.clone(),
                })?;
                endpoint.base_url = base_url;
            }
        }

        Ok(Self {
            mode,
            adapters,
            timeout,
        })
    }

    /// True when upstream providers must not be called
    pub fn forces_fallback(&self) -> bool {
        self.mode == Mode::Development
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigurationError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigurationError::InvalidValue {
            key: ENV_TIMEOUT.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Listen address for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Load `MEDIAKIT_HOST` / `MEDIAKIT_PORT`
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = lookup("MEDIAKIT_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("MEDIAKIT_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigurationError::InvalidValue {
                    key: "MEDIAKIT_PORT".to_string(),
                    value: port.clone(),
                })?;
        }
        Ok(config)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
