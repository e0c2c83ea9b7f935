use serde::Deserialize;

use crate::platform::{join_caption, local_time_from_epoch_secs, Post, SidecarChild};

/// One post capture as stored on disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPost {
    pub is_video: Option<bool>,
    pub caption: Option<StoredCaption>,
    pub posted_at: Option<i64>,
    pub src: Option<String>,
    pub video_url: Option<String>,
    pub sidecar_children: Option<Vec<StoredChild>>,
}

/// Captures written by older tools keep the caption fragments unjoined.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredCaption {
    Text(String),
    Fragments(Vec<String>),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredChild {
    pub is_video: Option<bool>,
    pub src: Option<String>,
    pub video_url: Option<String>,
}

impl From<StoredCaption> for String {
    fn from(caption: StoredCaption) -> Self {
        match caption {
            StoredCaption::Text(text) => text,
            StoredCaption::Fragments(fragments) => join_caption(fragments),
        }
    }
}

impl From<StoredPost> for Post {
    fn from(stored: StoredPost) -> Self {
        let is_video = stored.is_video.unwrap_or(false);
        let media_url = if is_video { stored.video_url } else { stored.src };

        Post::new(
            is_video,
            stored.caption.map(String::from).unwrap_or_default(),
            local_time_from_epoch_secs(stored.posted_at.unwrap_or(0)),
            media_url,
            stored
                .sidecar_children
                .unwrap_or_default()
                .into_iter()
                .map(SidecarChild::from)
                .collect(),
        )
    }
}

impl From<StoredChild> for SidecarChild {
    fn from(child: StoredChild) -> Self {
        let is_video = child.is_video.unwrap_or(false);
        let url = if is_video { child.video_url } else { child.src };
        SidecarChild::new(is_video, url)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::platform::MediaType;

    fn stored(value: serde_json::Value) -> Post {
        serde_json::from_value::<StoredPost>(value).unwrap().into()
    }

    #[test]
    fn test_stored_image_post() {
        let post = stored(json!({
            "isVideo": false,
            "caption": "hello",
            "postedAt": 1609459200,
            "src": "https://x/y/img.jpg",
            "videoUrl": null,
            "sidecarChildren": [ { "src": "https://x/z/img2.jpg" } ]
        }));

        assert_eq!(post.media_type(), MediaType::Image);
        assert_eq!(post.caption(), "hello");
        assert_eq!(post.posted_at().timestamp(), 1609459200);
        assert_eq!(post.media_url(), Some("https://x/y/img.jpg"));
        assert_eq!(post.sidecar_children().len(), 1);
        assert_eq!(post.sidecar_children()[0].url(), Some("https://x/z/img2.jpg"));
    }

    #[test]
    fn test_stored_video_post() {
        let post = stored(json!({
            "isVideo": true,
            "src": "https://x/y/cover.jpg",
            "videoUrl": "https://x/y/clip.mp4",
            "sidecarChildren": [ { "src": "https://x/z/img2.jpg" } ]
        }));

        assert_eq!(post.media_url(), Some("https://x/y/clip.mp4"));
        assert!(post.sidecar_children().is_empty());
        assert_eq!(post.caption(), "");
    }

    #[test]
    fn test_stored_caption_fragments() {
        let post = stored(json!({ "caption": ["a", "b", "c"], "src": "https://x/a.jpg" }));
        assert_eq!(post.caption(), "a\nb\nc");
    }

    #[test]
    fn test_null_fields_use_defaults() {
        let post = stored(json!({
            "isVideo": null,
            "caption": null,
            "postedAt": null,
            "src": "https://x/a.jpg",
            "videoUrl": null,
            "sidecarChildren": null
        }));

        assert_eq!(post.media_type(), MediaType::Image);
        assert_eq!(post.caption(), "");
        assert_eq!(post.posted_at().timestamp(), 0);
        assert_eq!(post.media_url(), Some("https://x/a.jpg"));
        assert!(post.sidecar_children().is_empty());
    }
}
