//! Fixture records served when upstream providers cannot or should not be called
//!
//! Fixtures depend only on the resolved platform and media type, never on
//! the source URL, and building one performs no I/O.

use crate::types::{Endpoint, Engagement, FormatEntry, MediaRecord, MediaRequest, MediaType, Platform};
use serde_json::Value;

/// Title of the YouTube audio fixture
pub const YOUTUBE_AUDIO_TITLE: &str = "Rick Astley - Never Gonna Give You Up (Audio)";

/// Title of the YouTube video fixture
pub const YOUTUBE_VIDEO_TITLE: &str = "Rick Astley - Never Gonna Give You Up (Official Video)";

fn engagement(likes: &str, comments: &str, shares: &str, retweets: &str, views: &str) -> Engagement {
    Engagement {
        likes: Some(likes.to_string()),
        comments: Some(comments.to_string()),
        shares: Some(shares.to_string()),
        retweets: Some(retweets.to_string()),
        views: Some(views.to_string()),
    }
}

/// Fixture record for a request on `endpoint`
///
/// The universal endpoint keeps its own shape (with `formats`) and only
/// labels the record with the hinted platform.
pub fn provide(endpoint: Endpoint, request: &MediaRequest) -> MediaRecord {
    match endpoint {
        Endpoint::Youtube => youtube(request.effective_media_type()),
        Endpoint::Tiktok => tiktok(),
        Endpoint::Twitter => twitter(),
        Endpoint::Universal => universal(endpoint.resolve_platform(request)),
    }
}

fn youtube(media_type: MediaType) -> MediaRecord {
    match media_type {
        MediaType::Audio => MediaRecord {
            title: YOUTUBE_AUDIO_TITLE.to_string(),
            author: "Rick Astley".to_string(),
            thumbnail_url: Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg".to_string()),
            duration_label: Some("3:33".to_string()),
            download_url: Some("https://example.com/demo/never-gonna-give-you-up.mp3".to_string()),
            engagement: engagement("16M", "2.3M", "0", "0", "1.5B"),
            platform: Platform::Youtube.to_string(),
            ..Default::default()
        }
        .with_extra("type", "audio")
        .with_extra("quality", "320kbps")
        .with_extra("fileSize", "8.2 MB"),
        MediaType::Video => MediaRecord {
            title: YOUTUBE_VIDEO_TITLE.to_string(),
            author: "Rick Astley".to_string(),
            thumbnail_url: Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg".to_string()),
            duration_label: Some("3:33".to_string()),
            download_url: Some("https://example.com/demo/never-gonna-give-you-up.mp4".to_string()),
            engagement: engagement("16M", "2.3M", "0", "0", "1.5B"),
            platform: Platform::Youtube.to_string(),
            ..Default::default()
        }
        .with_extra("type", "video")
        .with_extra("quality", "720p")
        .with_extra("container", "mp4"),
    }
}

fn tiktok() -> MediaRecord {
    MediaRecord {
        title: "Amazing dance moves #fyp #viral".to_string(),
        author: "@demo_creator".to_string(),
        thumbnail_url: Some("/placeholder.svg?height=400&width=300".to_string()),
        duration_label: Some("0:15".to_string()),
        download_url: Some("https://example.com/demo/tiktok-video.mp4".to_string()),
        engagement: engagement("1.2M", "15.3K", "8.7K", "0", "5.4M"),
        platform: Platform::Tiktok.to_string(),
        ..Default::default()
    }
    .with_extra("authorAvatar", "/placeholder.svg?height=100&width=100")
    .with_extra("music", "https://example.com/demo/tiktok-sound.mp3")
    .with_extra("region", "US")
}

fn twitter() -> MediaRecord {
    MediaRecord {
        title: "Check out this amazing video! 🚀".to_string(),
        author: "Demo User".to_string(),
        thumbnail_url: Some("/placeholder.svg?height=400&width=600".to_string()),
        duration_label: Some("0:45".to_string()),
        download_url: Some("https://example.com/demo/twitter-video.mp4".to_string()),
        engagement: engagement("2.5K", "128", "0", "890", "45K"),
        platform: Platform::Twitter.to_string(),
        ..Default::default()
    }
    .with_extra("verified", true)
    .with_extra("handle", "demo_user")
    .with_extra("type", "video")
}

fn universal(platform: Platform) -> MediaRecord {
    let formats: Vec<Value> = [
        FormatEntry::new("video", "1080p", "mp4", "25.3 MB"),
        FormatEntry::new("video", "720p", "mp4", "15.7 MB"),
        FormatEntry::new("video", "480p", "mp4", "8.2 MB"),
        FormatEntry::new("audio", "320kbps", "mp3", "4.1 MB"),
    ]
    .into_iter()
    .filter_map(|entry| serde_json::to_value(entry).ok())
    .collect();

    MediaRecord {
        title: "Sample Media Content".to_string(),
        author: "Content Creator".to_string(),
        thumbnail_url: Some("/placeholder.svg?height=300&width=400".to_string()),
        duration_label: Some("5:30".to_string()),
        download_url: Some("https://example.com/demo/sample-1080p.mp4".to_string()),
        engagement: engagement("12K", "340", "1.1K", "0", "250K"),
        platform: platform.to_string(),
        ..Default::default()
    }
    .with_extra("quality", "1080p")
    .with_extra("source", platform.as_str())
    .with_extra("formats", Value::Array(formats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_complete(record: &MediaRecord) {
        assert!(!record.title.is_empty());
        assert!(!record.author.is_empty());
        assert!(!record.platform.is_empty());
        assert!(record.thumbnail_url.is_some());
        assert!(record.duration_label.is_some());
        assert!(record.download_url.is_some());
        let e = &record.engagement;
        for value in [&e.likes, &e.comments, &e.shares, &e.retweets, &e.views] {
            assert!(value.is_some());
        }
    }

    #[test]
    fn test_youtube_audio_fixture() {
        let request = MediaRequest::new("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .media_type(MediaType::Audio);
        let record = provide(Endpoint::Youtube, &request);

        assert_eq!(record.title, YOUTUBE_AUDIO_TITLE);
        assert_eq!(record.extra["quality"], "320kbps");
        assert_eq!(record.extra["type"], "audio");
        assert_complete(&record);
    }

    #[test]
    fn test_youtube_video_is_default() {
        let record = provide(Endpoint::Youtube, &MediaRequest::new("x"));
        assert_eq!(record.title, YOUTUBE_VIDEO_TITLE);
        assert_eq!(record.extra["type"], "video");
    }

    #[test]
    fn test_fixture_ignores_source_url() {
        for endpoint in Endpoint::ALL {
            let a = provide(endpoint, &MediaRequest::new("https://a.example/1"));
            let b = provide(endpoint, &MediaRequest::new("not even a url"));
            assert_eq!(a, b);
            assert_complete(&a);
        }
    }

    #[test]
    fn test_universal_fixture_labels_hint() {
        let request = MediaRequest::new("https://www.tiktok.com/@a/video/1").platform(Platform::Tiktok);
        let record = provide(Endpoint::Universal, &request);
        assert_eq!(record.platform, "tiktok");
        assert_eq!(record.extra["source"], "tiktok");
        assert_eq!(record.extra["formats"].as_array().unwrap().len(), 4);
        assert_complete(&record);

        let record = provide(Endpoint::Universal, &MediaRequest::new("https://vimeo.com/1"));
        assert_eq!(record.platform, "generic");
    }

    #[test]
    fn test_twitter_fixture_verified() {
        let record = provide(Endpoint::Twitter, &MediaRequest::default());
        assert_eq!(record.extra["verified"], true);
        assert_eq!(record.engagement.retweets.as_deref(), Some("890"));
    }
}
