mod error;
pub mod model;
mod util;

use std::sync::Arc;

pub use error::*;
pub use model::ProfileFeed;
pub use util::*;

use crate::{
    config::InstagramConfig,
    service::http::HttpClient,
};

use model::ProfileResponse;

/// Reads a profile's public feed through the `?__a=1` JSON endpoint.
pub struct PlatformInstagram {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl PlatformInstagram {
    pub fn new(http: Arc<dyn HttpClient>, config: &InstagramConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/{}/?__a=1", self.base_url, username)
    }

    pub async fn fetch_profile(&self, username: &str) -> Result<ProfileFeed, InstagramError> {
        let url = self.profile_url(username);
        info!("Fetching profile feed: {}", url);

        let value = self.http.get_json(&url).await?;
        let response = serde_json::from_value::<ProfileResponse>(value)?;
        let feed = ProfileFeed::from(response);

        info!(
            "Profile feed fetched: {} videos, {} posts",
            feed.videos.len(),
            feed.posts.len()
        );
        Ok(feed)
    }
}
