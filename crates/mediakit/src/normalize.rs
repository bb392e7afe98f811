//! Normalization of provider responses into [`MediaRecord`]
//!
//! Design: every output field is resolved independently through three
//! tiers, expressed as tables rather than code:
//!
//! 1. provider-specific JSON pointers (per [`ResponseShape`])
//! 2. generic pointers shared by all providers ([`Field::generic_paths`])
//! 3. a fixed placeholder ([`Field::placeholder`])
//!
//! A pointer only counts when it lands on a non-empty scalar, so objects,
//! arrays, nulls and blank strings fall through to the next tier. Nothing in
//! this module can fail.

use crate::adapters::RawUpstreamResponse;
use crate::types::{Engagement, FormatEntry, MediaRequest, MediaRecord};
use serde_json::{Map, Value};

/// Placeholder for unknown titles and authors
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for missing engagement counters
pub const ZERO: &str = "0";

/// Placeholder for missing thumbnails
pub const PLACEHOLDER_THUMBNAIL: &str = "/placeholder.svg";

/// Placeholder for missing download links
pub const PLACEHOLDER_DOWNLOAD: &str = "#";

/// Placeholder for missing durations
pub const PLACEHOLDER_DURATION: &str = "0:00";

/// Canonical scalar fields of a [`MediaRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Author,
    ThumbnailUrl,
    DurationLabel,
    DownloadUrl,
    Likes,
    Comments,
    Shares,
    Retweets,
    Views,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Title,
        Field::Author,
        Field::ThumbnailUrl,
        Field::DurationLabel,
        Field::DownloadUrl,
        Field::Likes,
        Field::Comments,
        Field::Shares,
        Field::Retweets,
        Field::Views,
    ];

    /// Pointers tried when no provider-specific path resolves
    ///
    /// Providers disagree on capitalization and nesting, hence the variants.
    pub fn generic_paths(&self) -> &'static [&'static str] {
        match self {
            Field::Title => &["/title", "/Title", "/data/title", "/name"],
            Field::Author => &["/author", "/Author", "/author/name", "/uploader", "/username"],
            Field::ThumbnailUrl => &["/thumbnail", "/thumbnailUrl", "/Thumbnail", "/cover", "/image"],
            Field::DurationLabel => &["/duration", "/Duration", "/length"],
            Field::DownloadUrl => &["/downloadUrl", "/download_url", "/link", "/play"],
            Field::Likes => &["/likes", "/like_count", "/likeCount"],
            Field::Comments => &["/comments", "/comment_count", "/commentCount"],
            Field::Shares => &["/shares", "/share_count", "/shareCount"],
            Field::Retweets => &["/retweets", "/retweet_count", "/retweetCount"],
            Field::Views => &["/views", "/view_count", "/viewCount"],
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Title | Field::Author => UNKNOWN,
            Field::ThumbnailUrl => PLACEHOLDER_THUMBNAIL,
            Field::DurationLabel => PLACEHOLDER_DURATION,
            Field::DownloadUrl => PLACEHOLDER_DOWNLOAD,
            Field::Likes | Field::Comments | Field::Shares | Field::Retweets | Field::Views => ZERO,
        }
    }
}

/// Which provider contract a raw body follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    YoutubeVideo,
    YoutubeAudio,
    Tiktok,
    Twitter,
    Universal,
}

/// Tier a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Platform,
    Generic,
    Placeholder,
}

/// Result of resolving one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub tier: Tier,
}

/// Placeholder for a platform-specific extra field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Text(&'static str),
    Flag(bool),
}

impl Placeholder {
    fn to_value(self) -> Value {
        match self {
            Placeholder::Text(text) => Value::String(text.to_string()),
            Placeholder::Flag(flag) => Value::Bool(flag),
        }
    }
}

/// Platform-specific field copied into [`MediaRecord::extra`]
///
/// An empty `paths` list makes the placeholder a constant.
#[derive(Debug, Clone, Copy)]
pub struct ExtraRule {
    pub key: &'static str,
    pub paths: &'static [&'static str],
    pub placeholder: Placeholder,
}

const fn extra(key: &'static str, paths: &'static [&'static str], placeholder: Placeholder) -> ExtraRule {
    ExtraRule {
        key,
        paths,
        placeholder,
    }
}

type FieldPaths = (Field, &'static [&'static str]);

/// Resolution table for one response shape
struct Profile {
    fields: &'static [FieldPaths],
    extras: &'static [ExtraRule],
    /// Array of downloadable variants, mapped into `formats`
    formats: Option<&'static str>,
}

// youtube-media-downloader: /v2/video/details
const YOUTUBE_VIDEO: Profile = Profile {
    fields: &[
        (Field::Title, &["/title"]),
        (Field::Author, &["/channel/name", "/channel/handle"]),
        (Field::ThumbnailUrl, &["/thumbnails/0/url"]),
        (Field::DurationLabel, &["/lengthSeconds"]),
        (Field::DownloadUrl, &["/videos/items/0/url"]),
        (Field::Likes, &["/likeCount"]),
        (Field::Comments, &["/commentCount"]),
        (Field::Views, &["/viewCount"]),
    ],
    extras: &[
        extra("type", &[], Placeholder::Text("video")),
        extra("quality", &["/videos/items/0/quality"], Placeholder::Text(UNKNOWN)),
        extra("container", &["/videos/items/0/extension"], Placeholder::Text("mp4")),
    ],
    formats: None,
};

// youtube-mp36: /dl
const YOUTUBE_AUDIO: Profile = Profile {
    fields: &[
        (Field::Title, &["/title"]),
        (Field::DurationLabel, &["/duration"]),
        (Field::DownloadUrl, &["/link"]),
    ],
    extras: &[
        extra("type", &[], Placeholder::Text("audio")),
        extra("quality", &["/quality", "/bitrate"], Placeholder::Text("320kbps")),
        extra("fileSize", &["/filesize"], Placeholder::Text(UNKNOWN)),
    ],
    formats: None,
};

// tiktok-video-no-watermark2: everything nested under `data`
const TIKTOK: Profile = Profile {
    fields: &[
        (Field::Title, &["/data/title"]),
        (Field::Author, &["/data/author/nickname", "/data/author/unique_id"]),
        (Field::ThumbnailUrl, &["/data/cover", "/data/origin_cover"]),
        (Field::DurationLabel, &["/data/duration"]),
        (Field::DownloadUrl, &["/data/hdplay", "/data/play"]),
        (Field::Likes, &["/data/digg_count"]),
        (Field::Comments, &["/data/comment_count"]),
        (Field::Shares, &["/data/share_count"]),
        (Field::Views, &["/data/play_count"]),
    ],
    extras: &[
        extra("authorAvatar", &["/data/author/avatar"], Placeholder::Text(PLACEHOLDER_THUMBNAIL)),
        extra("music", &["/data/music", "/data/music_info/play"], Placeholder::Text(PLACEHOLDER_DOWNLOAD)),
        extra("region", &["/data/region"], Placeholder::Text(UNKNOWN)),
    ],
    formats: None,
};

// twitter downloader; `primaryMedia` is lifted out of `media[]` by the adapter
const TWITTER: Profile = Profile {
    fields: &[
        (Field::Title, &["/text", "/full_text"]),
        (Field::Author, &["/user/name", "/user/screen_name"]),
        (Field::ThumbnailUrl, &["/primaryMedia/thumbnail", "/primaryMedia/preview"]),
        (Field::DurationLabel, &["/primaryMedia/duration"]),
        (Field::DownloadUrl, &["/primaryMedia/url"]),
        (Field::Likes, &["/favorite_count"]),
        (Field::Comments, &["/reply_count"]),
        (Field::Retweets, &["/retweet_count"]),
        (Field::Views, &["/views_count"]),
    ],
    extras: &[
        extra("verified", &["/user/verified", "/user/is_blue_verified"], Placeholder::Flag(false)),
        extra("handle", &["/user/screen_name"], Placeholder::Text(UNKNOWN)),
        extra("type", &["/primaryMedia/type"], Placeholder::Text("none")),
    ],
    formats: None,
};

// social-download-all-in-one: already close to canonical
const UNIVERSAL: Profile = Profile {
    fields: &[(Field::DownloadUrl, &["/medias/0/url"])],
    extras: &[
        extra("quality", &["/medias/0/quality"], Placeholder::Text(UNKNOWN)),
        extra("source", &["/source"], Placeholder::Text("generic")),
    ],
    formats: Some("/medias"),
};

/// Resolution rules for one entry of the universal `medias` array
const FORMAT_RULES: [(&[&str], &str); 4] = [
    (&["/type"], "video"),
    (&["/quality", "/label"], UNKNOWN),
    (&["/extension", "/ext"], "mp4"),
    (&["/formattedSize", "/size"], UNKNOWN),
];

impl ResponseShape {
    fn profile(&self) -> &'static Profile {
        match self {
            ResponseShape::YoutubeVideo => &YOUTUBE_VIDEO,
            ResponseShape::YoutubeAudio => &YOUTUBE_AUDIO,
            ResponseShape::Tiktok => &TIKTOK,
            ResponseShape::Twitter => &TWITTER,
            ResponseShape::Universal => &UNIVERSAL,
        }
    }

    /// Provider-specific pointers for a field (empty when the provider has none)
    pub fn platform_paths(&self, field: Field) -> &'static [&'static str] {
        self.profile()
            .fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, paths)| *paths)
            .unwrap_or(&[])
    }

    pub fn extra_rules(&self) -> &'static [ExtraRule] {
        self.profile().extras
    }
}

/// Map a raw provider response into a complete [`MediaRecord`]
pub fn normalize(raw: &RawUpstreamResponse, platform: &str, request: &MediaRequest) -> MediaRecord {
    let body = &raw.body;
    let shape = raw.shape;
    let text = |field: Field| Some(resolve_field(body, shape, field).value);

    let mut extra = Map::new();
    for rule in shape.extra_rules() {
        extra.insert(rule.key.to_string(), resolve_extra(body, rule));
    }
    if let Some(path) = shape.profile().formats {
        let formats: Vec<Value> = build_formats(body, path)
            .into_iter()
            .filter_map(|entry| serde_json::to_value(entry).ok())
            .collect();
        extra.insert("formats".to_string(), Value::Array(formats));
    }
    if !request.source_url.is_empty() {
        extra.insert(
            "sourceUrl".to_string(),
            Value::String(request.source_url.clone()),
        );
    }

    MediaRecord {
        title: resolve_field(body, shape, Field::Title).value,
        author: resolve_field(body, shape, Field::Author).value,
        thumbnail_url: text(Field::ThumbnailUrl),
        duration_label: text(Field::DurationLabel),
        download_url: text(Field::DownloadUrl),
        engagement: Engagement {
            likes: text(Field::Likes),
            comments: text(Field::Comments),
            shares: text(Field::Shares),
            retweets: text(Field::Retweets),
            views: text(Field::Views),
        },
        platform: platform.to_string(),
        extra,
    }
}

/// Resolve one field through the three tiers
pub fn resolve_field(body: &Value, shape: ResponseShape, field: Field) -> Resolved {
    if let Some(value) = first_display(body, shape.platform_paths(field)) {
        return Resolved {
            value,
            tier: Tier::Platform,
        };
    }
    if let Some(value) = first_display(body, field.generic_paths()) {
        return Resolved {
            value,
            tier: Tier::Generic,
        };
    }
    Resolved {
        value: field.placeholder().to_string(),
        tier: Tier::Placeholder,
    }
}

/// Text extras are always strings, flag extras always booleans
fn resolve_extra(body: &Value, rule: &ExtraRule) -> Value {
    let found = match rule.placeholder {
        Placeholder::Text(_) => first_display(body, rule.paths).map(Value::String),
        Placeholder::Flag(_) => rule
            .paths
            .iter()
            .filter_map(|path| body.pointer(path))
            .find_map(Value::as_bool)
            .map(Value::Bool),
    };
    found.unwrap_or_else(|| rule.placeholder.to_value())
}

fn build_formats(body: &Value, path: &str) -> Vec<FormatEntry> {
    let Some(entries) = body.pointer(path).and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter(|entry| entry.is_object())
        .map(|entry| {
            let [kind, quality, container, size] =
                FORMAT_RULES.map(|(paths, placeholder)| {
                    first_display(entry, paths).unwrap_or_else(|| placeholder.to_string())
                });
            FormatEntry {
                kind,
                quality,
                container,
                size_label: size,
            }
        })
        .collect()
}

fn first_display(body: &Value, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .filter_map(|path| body.pointer(path))
        .find_map(display)
}

/// Render a scalar for display; containers, nulls and blanks yield `None`
fn display(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(shape: ResponseShape, body: Value) -> RawUpstreamResponse {
        RawUpstreamResponse { shape, body }
    }

    #[test]
    fn test_title_only_degrades_to_placeholders() {
        let request = MediaRequest::default();
        for shape in [
            ResponseShape::YoutubeVideo,
            ResponseShape::YoutubeAudio,
            ResponseShape::Tiktok,
            ResponseShape::Twitter,
            ResponseShape::Universal,
        ] {
            let record = normalize(&raw(shape, json!({"title": "Only Title"})), "test", &request);

            assert_eq!(record.title, "Only Title");
            assert_eq!(record.author, UNKNOWN);
            assert_eq!(record.thumbnail_url.as_deref(), Some(PLACEHOLDER_THUMBNAIL));
            assert_eq!(record.duration_label.as_deref(), Some(PLACEHOLDER_DURATION));
            assert_eq!(record.download_url.as_deref(), Some(PLACEHOLDER_DOWNLOAD));
            assert_eq!(record.engagement.likes.as_deref(), Some(ZERO));
            assert_eq!(record.engagement.comments.as_deref(), Some(ZERO));
            assert_eq!(record.engagement.shares.as_deref(), Some(ZERO));
            assert_eq!(record.engagement.retweets.as_deref(), Some(ZERO));
            assert_eq!(record.engagement.views.as_deref(), Some(ZERO));
            assert_eq!(record.platform, "test");
        }
    }

    #[test]
    fn test_unexpected_structure_never_fails() {
        let request = MediaRequest::default();
        for body in [json!(null), json!([1, 2, 3]), json!("text"), json!({"data": 5})] {
            let record = normalize(&raw(ResponseShape::Tiktok, body), "tiktok", &request);
            assert_eq!(record.title, UNKNOWN);
            assert_eq!(record.author, UNKNOWN);
        }
    }

    #[test]
    fn test_tiers_resolve_independently() {
        let body = json!({
            "data": {"title": "Nested"},
            "Author": "Capitalized",
        });

        let title = resolve_field(&body, ResponseShape::Tiktok, Field::Title);
        assert_eq!(title.tier, Tier::Platform);
        assert_eq!(title.value, "Nested");

        let author = resolve_field(&body, ResponseShape::Tiktok, Field::Author);
        assert_eq!(author.tier, Tier::Generic);
        assert_eq!(author.value, "Capitalized");

        let views = resolve_field(&body, ResponseShape::Tiktok, Field::Views);
        assert_eq!(views.tier, Tier::Placeholder);
        assert_eq!(views.value, ZERO);
    }

    #[test]
    fn test_blank_and_object_values_fall_through() {
        // TikTok `author` is an object; it must not become the display name
        let body = json!({
            "data": {"title": "  ", "author": {"nickname": "creator"}},
            "title": "Fallback Title",
            "author": {"id": 1},
        });

        assert_eq!(
            resolve_field(&body, ResponseShape::Tiktok, Field::Title).value,
            "Fallback Title"
        );
        assert_eq!(
            resolve_field(&body, ResponseShape::Tiktok, Field::Author).value,
            "creator"
        );
    }

    #[test]
    fn test_numbers_become_display_strings() {
        let body = json!({"data": {"digg_count": 1200, "play_count": "1.2M"}});
        let record = normalize(&raw(ResponseShape::Tiktok, body), "tiktok", &MediaRequest::default());
        assert_eq!(record.engagement.likes.as_deref(), Some("1200"));
        assert_eq!(record.engagement.views.as_deref(), Some("1.2M"));
    }

    #[test]
    fn test_youtube_video_profile() {
        let body = json!({
            "title": "Never Gonna Give You Up",
            "channel": {"name": "Rick Astley"},
            "thumbnails": [{"url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hq.jpg"}],
            "lengthSeconds": 212,
            "viewCount": 1500000000u64,
            "videos": {"items": [{"url": "https://cdn.example/v.mp4", "quality": "720p", "extension": "mp4"}]}
        });
        let request = MediaRequest::new("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        let record = normalize(&raw(ResponseShape::YoutubeVideo, body), "youtube", &request);

        assert_eq!(record.author, "Rick Astley");
        assert_eq!(record.duration_label.as_deref(), Some("212"));
        assert_eq!(record.download_url.as_deref(), Some("https://cdn.example/v.mp4"));
        assert_eq!(record.engagement.views.as_deref(), Some("1500000000"));
        assert_eq!(record.extra["type"], "video");
        assert_eq!(record.extra["quality"], "720p");
        assert_eq!(
            record.extra["sourceUrl"],
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_youtube_audio_profile() {
        let body = json!({"title": "Song", "link": "https://cdn.example/a.mp3", "duration": 212.5, "status": "ok"});
        let record = normalize(&raw(ResponseShape::YoutubeAudio, body), "youtube", &MediaRequest::default());

        assert_eq!(record.download_url.as_deref(), Some("https://cdn.example/a.mp3"));
        assert_eq!(record.duration_label.as_deref(), Some("212.5"));
        assert_eq!(record.extra["type"], "audio");
        assert_eq!(record.extra["quality"], "320kbps");
        assert!(record.extra.get("sourceUrl").is_none());
    }

    #[test]
    fn test_extras_keep_fixture_types() {
        let body = json!({"title": "Song", "filesize": 8601234, "bitrate": 320});
        let record = normalize(&raw(ResponseShape::YoutubeAudio, body), "youtube", &MediaRequest::default());
        assert_eq!(record.extra["fileSize"], "8601234");
        assert_eq!(record.extra["quality"], "320");

        let body = json!({"text": "t", "user": {"verified": "yes", "is_blue_verified": true}});
        let record = normalize(&raw(ResponseShape::Twitter, body), "twitter", &MediaRequest::default());
        assert_eq!(record.extra["verified"], true);
    }

    #[test]
    fn test_twitter_without_media() {
        let body = json!({
            "text": "hello world",
            "user": {"name": "Someone", "verified": true},
            "media": [],
            "primaryMedia": null
        });
        let record = normalize(&raw(ResponseShape::Twitter, body), "twitter", &MediaRequest::default());

        assert_eq!(record.title, "hello world");
        assert_eq!(record.download_url.as_deref(), Some(PLACEHOLDER_DOWNLOAD));
        assert_eq!(record.thumbnail_url.as_deref(), Some(PLACEHOLDER_THUMBNAIL));
        assert_eq!(record.extra["verified"], true);
        assert_eq!(record.extra["type"], "none");
    }

    #[test]
    fn test_universal_formats() {
        let body = json!({
            "title": "Clip",
            "author": "Uploader",
            "source": "instagram",
            "medias": [
                {"url": "https://cdn.example/1080.mp4", "quality": "1080p", "extension": "mp4", "type": "video", "formattedSize": "25.3 MB"},
                {"url": "https://cdn.example/a.m4a", "type": "audio"},
                "garbage"
            ]
        });
        let record = normalize(&raw(ResponseShape::Universal, body), "generic", &MediaRequest::default());

        assert_eq!(record.author, "Uploader");
        assert_eq!(record.download_url.as_deref(), Some("https://cdn.example/1080.mp4"));
        assert_eq!(record.extra["source"], "instagram");
        assert_eq!(record.extra["quality"], "1080p");

        let formats = record.extra["formats"].as_array().unwrap();
        assert_eq!(formats.len(), 2);
        assert_eq!(formats[0]["sizeLabel"], "25.3 MB");
        assert_eq!(formats[1]["type"], "audio");
        assert_eq!(formats[1]["quality"], UNKNOWN);
        assert_eq!(formats[1]["container"], "mp4");
    }

    #[test]
    fn test_universal_without_medias_has_empty_formats() {
        let record = normalize(
            &raw(ResponseShape::Universal, json!({"title": "x"})),
            "generic",
            &MediaRequest::default(),
        );
        assert_eq!(record.extra["formats"], json!([]));
    }
}
