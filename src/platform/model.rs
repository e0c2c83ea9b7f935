use chrono::{DateTime, Local, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn from_video_flag(is_video: bool) -> Self {
        if is_video {
            Self::Video
        } else {
            Self::Image
        }
    }

    /// Label used in post records, e.g. `IMAGE URL`.
    pub fn url_label(&self) -> &'static str {
        match self {
            Self::Image => "IMAGE URL",
            Self::Video => "VIDEO URL",
        }
    }
}

/// A secondary media item attached to a carousel post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarChild {
    is_video: bool,
    url: Option<String>,
}

impl SidecarChild {
    pub fn new(is_video: bool, url: Option<String>) -> Self {
        Self {
            is_video,
            url: non_empty(url),
        }
    }

    pub fn media_type(&self) -> MediaType {
        MediaType::from_video_flag(self.is_video)
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// One normalized feed item.
///
/// Fields are private so a post cannot change once built. A video post never
/// carries carousel children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    is_video: bool,
    caption: String,
    posted_at: DateTime<Local>,
    media_url: Option<String>,
    sidecar_children: Vec<SidecarChild>,
}

impl Post {
    pub fn new(
        is_video: bool,
        caption: String,
        posted_at: DateTime<Local>,
        media_url: Option<String>,
        sidecar_children: Vec<SidecarChild>,
    ) -> Self {
        let sidecar_children = if is_video { Vec::new() } else { sidecar_children };

        Self {
            is_video,
            caption,
            posted_at,
            media_url: non_empty(media_url),
            sidecar_children,
        }
    }

    pub fn media_type(&self) -> MediaType {
        MediaType::from_video_flag(self.is_video)
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn posted_at(&self) -> &DateTime<Local> {
        &self.posted_at
    }

    pub fn media_url(&self) -> Option<&str> {
        self.media_url.as_deref()
    }

    pub fn sidecar_children(&self) -> &[SidecarChild] {
        &self.sidecar_children
    }
}

/// Joins caption fragments in order with a line break.
pub fn join_caption<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut caption = String::new();
    for (i, fragment) in fragments.into_iter().enumerate() {
        if i > 0 {
            caption.push('\n');
        }
        caption.push_str(fragment.as_ref());
    }
    caption
}

/// Converts epoch seconds to a local date-time, going through epoch
/// milliseconds. Out of range values collapse to the Unix epoch.
pub fn local_time_from_epoch_secs(secs: i64) -> DateTime<Local> {
    secs.checked_mul(1000)
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or_else(DateTime::<Utc>::default)
        .with_timezone(&Local)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
