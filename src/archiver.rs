use std::sync::Arc;

use anyhow::Context;

use crate::{
    config::AppConfig,
    error::AppResult,
    platform::{archive::read_stored_posts, instagram::process_instagram_username, PlatformError, PlatformInstagram},
    runtime::{OutputLayout, PostProcessor, RunSummary},
    service::{download::ensure_dir, http::HttpClient, Journal, MediaDownloader},
};

/// Entry point for both modes. Building one performs no I/O; work starts in
/// [`Archiver::run_live`] or [`Archiver::run_offline`].
pub struct Archiver {
    config: AppConfig,
    http: Arc<dyn HttpClient>,
    journal: Journal,
}

impl Archiver {
    pub fn new(config: AppConfig, http: Arc<dyn HttpClient>) -> Self {
        let journal = Journal::new(config.paths.clone());
        Self { config, http, journal }
    }

    /// Fetches the profile feed, then processes its videos followed by its posts.
    /// A fetch failure is journaled and aborts the run.
    pub async fn run_live(&self, profile: &str) -> AppResult<RunSummary> {
        let username = process_instagram_username(profile).map_err(PlatformError::from)?;
        info!("Archiving profile {}", username);

        self.prepare_output().await?;
        ensure_dir(&self.config.paths.downloads_dir())
            .await
            .context("Failed to create downloads folder")?;

        let platform = PlatformInstagram::new(self.http.clone(), &self.config.instagram);
        let feed = match platform.fetch_profile(&username).await {
            Ok(feed) => feed,
            Err(e) => {
                self.journal
                    .record_error(&format!("FETCH FAILED: {}", platform.profile_url(&username)), &e)
                    .await;
                return Err(PlatformError::from(e).into());
            }
        };

        if feed.is_empty() {
            warn!("Profile {} has no media to archive", username);
        }

        let processor = self.processor(OutputLayout::Flat);
        let mut summary = processor.run(&feed.videos).await;
        summary += processor.run(&feed.posts).await;

        info!("Operation Complete: {}", summary);
        Ok(summary)
    }

    /// Archives every stored capture into its own dated folder.
    pub async fn run_offline(&self) -> AppResult<RunSummary> {
        let inputs_dir = &self.config.paths.inputs_dir;
        let stored = read_stored_posts(inputs_dir).await.map_err(PlatformError::from)?;

        self.prepare_output().await?;
        for failure in &stored.failures {
            self.journal
                .record_error(&format!("CAPTURE SKIPPED: {}", failure.path().display()), failure)
                .await;
        }

        let summary = self.processor(OutputLayout::Dated).run(&stored.posts).await;

        info!("Operation Complete: {}", summary);
        Ok(summary)
    }

    async fn prepare_output(&self) -> AppResult<()> {
        let output_dir = self.config.paths.output_dir();
        ensure_dir(output_dir)
            .await
            .with_context(|| format!("Failed to create output folder {}", output_dir.display()))?;
        Ok(())
    }

    fn processor(&self, layout: OutputLayout) -> PostProcessor {
        let downloader = MediaDownloader::new(self.http.clone(), self.config.download.naming);
        PostProcessor::new(self.journal.clone(), downloader, self.config.paths.clone(), layout)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        config::{DownloadConfig, InstagramConfig, PathsConfig},
        error::AppError,
        runtime::dated_folder_name,
        utils::test::{MockHttpClient, ScratchDir},
    };

    fn config(scratch: &ScratchDir) -> AppConfig {
        AppConfig {
            paths: PathsConfig::new(scratch.path().join("results"), scratch.path().join("inputs")),
            instagram: InstagramConfig::default(),
            download: DownloadConfig::default(),
        }
    }

    fn read(path: std::path::PathBuf) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[tokio::test]
    async fn test_offline_end_to_end() {
        let scratch = ScratchDir::new();
        let config = config(&scratch);
        std::fs::create_dir_all(&config.paths.inputs_dir).unwrap();
        std::fs::write(
            config.paths.inputs_dir.join("post.json"),
            json!({
                "isVideo": false,
                "caption": "hello",
                "postedAt": 1609459200,
                "src": "https://x/y/img.jpg",
                "sidecarChildren": [ { "src": "https://x/z/img2.jpg" } ]
            })
            .to_string(),
        )
        .unwrap();

        let archiver = Archiver::new(config.clone(), Arc::new(MockHttpClient::new()));
        let summary = archiver.run_offline().await.unwrap();

        assert_eq!(summary.downloaded, 2);
        let results = config.paths.output_dir();
        let folders: Vec<_> = std::fs::read_dir(results)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.is_dir())
            .collect();
        assert_eq!(folders.len(), 1);

        let posted_at = crate::platform::local_time_from_epoch_secs(1609459200);
        let folder = results.join(dated_folder_name(&posted_at));
        assert_eq!(folders[0], folder);

        let record = read(folder.join("post.txt"));
        assert!(record.contains(&format!("TIMESTAMP: {}", crate::runtime::format_timestamp(&posted_at))));
        assert!(record.contains("CAPTION: hello"));
        assert_eq!(read(folder.join("img.jpg")), "https://x/y/img.jpg");
        assert_eq!(read(folder.join("img2.jpg")), "https://x/z/img2.jpg");

        assert_eq!(
            read(config.paths.images_log()),
            "\n\nhttps://x/y/img.jpg\n\nhttps://x/z/img2.jpg"
        );
    }

    #[tokio::test]
    async fn test_offline_journals_bad_capture() {
        let scratch = ScratchDir::new();
        let config = config(&scratch);
        std::fs::create_dir_all(&config.paths.inputs_dir).unwrap();
        std::fs::write(config.paths.inputs_dir.join("bad.json"), "[").unwrap();
        std::fs::write(config.paths.inputs_dir.join("good.json"), r#"{"src": "https://x/ok.jpg"}"#).unwrap();

        let archiver = Archiver::new(config.clone(), Arc::new(MockHttpClient::new()));
        let summary = archiver.run_offline().await.unwrap();

        assert_eq!(summary.posts, 1);
        assert!(read(config.paths.error_log()).contains("CAPTURE SKIPPED:"));
    }

    #[tokio::test]
    async fn test_offline_requires_inputs_folder() {
        let scratch = ScratchDir::new();
        let archiver = Archiver::new(config(&scratch), Arc::new(MockHttpClient::new()));

        assert!(matches!(
            archiver.run_offline().await,
            Err(AppError::PlatformError(PlatformError::Source(_)))
        ));
    }

    #[tokio::test]
    async fn test_live_processes_videos_then_posts() {
        let scratch = ScratchDir::new();
        let config = config(&scratch);
        let http = Arc::new(MockHttpClient::new().with_json(
            "https://www.instagram.com/natgeo/?__a=1",
            json!({ "graphql": { "user": {
                "edge_felix_video_timeline": { "edges": [
                    { "node": { "is_video": true, "video_url": "https://x/v/clip.mp4" } }
                ]},
                "edge_owner_to_timeline_media": { "edges": [
                    { "node": { "is_video": false, "display_url": "https://x/p/photo.jpg",
                        "edge_sidecar_to_children": { "edges": [
                            { "node": { "display_url": "https://x/c/child.jpg" } }
                        ]}
                    }}
                ]}
            }}}),
        ));

        let archiver = Archiver::new(config.clone(), http.clone());
        let summary = archiver.run_live("@natgeo").await.unwrap();

        assert_eq!(summary.posts, 2);
        assert_eq!(summary.downloaded, 3);
        assert_eq!(
            http.requests(),
            [
                "https://www.instagram.com/natgeo/?__a=1",
                "https://x/v/clip.mp4",
                "https://x/p/photo.jpg",
                "https://x/c/child.jpg"
            ]
        );
        let downloads = config.paths.downloads_dir();
        assert!(downloads.join("clip.mp4").exists());
        assert!(downloads.join("child.jpg").exists());
        assert_eq!(read(config.paths.videos_log()), "\n\nhttps://x/v/clip.mp4");
    }

    #[tokio::test]
    async fn test_live_fetch_failure_aborts() {
        let scratch = ScratchDir::new();
        let config = config(&scratch);
        let http = Arc::new(MockHttpClient::new().failing("https://www.instagram.com/natgeo/?__a=1"));

        let archiver = Archiver::new(config.clone(), http.clone());
        let result = archiver.run_live("natgeo").await;

        assert!(matches!(
            result,
            Err(AppError::PlatformError(PlatformError::Instagram(_)))
        ));
        assert_eq!(http.requests().len(), 1);
        assert!(read(config.paths.error_log()).contains("FETCH FAILED: https://www.instagram.com/natgeo/?__a=1"));
        assert!(!config.paths.output_log().exists());
    }

    #[tokio::test]
    async fn test_live_rejects_invalid_username() {
        let scratch = ScratchDir::new();
        let http = Arc::new(MockHttpClient::new());
        let archiver = Archiver::new(config(&scratch), http.clone());

        assert!(archiver.run_live("not a user").await.is_err());
        assert!(http.requests().is_empty());
        assert!(!scratch.path().join("results").exists());
    }
}
