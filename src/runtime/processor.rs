use std::{
    fmt::{self, Display},
    ops::AddAssign,
    path::PathBuf,
};

use chrono::{DateTime, Local};

use crate::{
    config::PathsConfig,
    platform::{MediaType, Post},
    service::{
        download::{ensure_dir, DownloadOutcome},
        Journal, JournalKind, MediaDownloader,
    },
};

const POST_RECORD_FILE: &str = "post.txt";

/// Where a post's record and media are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLayout {
    /// Every post shares `downloads/`, records go to `output.txt`.
    Flat,
    /// Each post gets a folder named after its date, holding `post.txt` and its media.
    Dated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub posts: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl AddAssign for RunSummary {
    fn add_assign(&mut self, other: Self) {
        self.posts += other.posts;
        self.downloaded += other.downloaded;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} posts, {} downloaded, {} skipped, {} failed",
            self.posts, self.downloaded, self.skipped, self.failed
        )
    }
}

struct Destination {
    media_dir: PathBuf,
    record_file: PathBuf,
}

/// Writes post records and index logs, then downloads each post's media,
/// strictly one post and one URL at a time.
pub struct PostProcessor {
    journal: Journal,
    downloader: MediaDownloader,
    paths: PathsConfig,
    layout: OutputLayout,
}

impl PostProcessor {
    pub fn new(journal: Journal, downloader: MediaDownloader, paths: PathsConfig, layout: OutputLayout) -> Self {
        Self {
            journal,
            downloader,
            paths,
            layout,
        }
    }

    pub async fn run(&self, posts: &[Post]) -> RunSummary {
        let mut summary = RunSummary::default();
        for post in posts {
            self.process_post(post, &mut summary).await;
        }
        summary
    }

    async fn process_post(&self, post: &Post, summary: &mut RunSummary) {
        summary.posts += 1;
        let destination = self.destination_for(post);
        debug!("Processing post from {} into {}", post.posted_at(), destination.media_dir.display());

        if let Err(e) = ensure_dir(&destination.media_dir).await {
            let subject = format!("FOLDER FAILED: {}", destination.media_dir.display());
            self.journal.record_error(&subject, &e).await;
        }

        self.journal
            .append_to(&destination.record_file, &post_record(post))
            .await;

        match post.media_url() {
            Some(url) => self.save_media(post.media_type(), url, &destination, summary).await,
            None => {
                warn!("Post from {} has no media URL", post.posted_at());
                summary.skipped += 1;
            }
        }

        for child in post.sidecar_children() {
            match child.url() {
                Some(url) => self.save_media(child.media_type(), url, &destination, summary).await,
                None => summary.skipped += 1,
            }
        }
    }

    async fn save_media(&self, media_type: MediaType, url: &str, destination: &Destination, summary: &mut RunSummary) {
        let index = match media_type {
            MediaType::Image => JournalKind::Images,
            MediaType::Video => JournalKind::Videos,
        };
        self.journal.append(index, url).await;

        match self.downloader.download(url, &destination.media_dir).await {
            Ok(DownloadOutcome::Saved { .. }) => summary.downloaded += 1,
            Ok(DownloadOutcome::Skipped) => summary.skipped += 1,
            Err(e) => {
                self.journal
                    .record_error(&format!("DOWNLOAD FAILED: {}", url), &e)
                    .await;
                summary.failed += 1;
            }
        }
    }

    fn destination_for(&self, post: &Post) -> Destination {
        match self.layout {
            OutputLayout::Flat => Destination {
                media_dir: self.paths.downloads_dir(),
                record_file: self.paths.output_log(),
            },
            OutputLayout::Dated => {
                let media_dir = self.paths.output_dir().join(dated_folder_name(post.posted_at()));
                let record_file = media_dir.join(POST_RECORD_FILE);
                Destination { media_dir, record_file }
            }
        }
    }
}

/// `Weekday-Month-Day-Year-HH-MM-SS`, e.g. `Fri-Jan-01-2021-00-00-00`.
pub fn dated_folder_name(at: &DateTime<Local>) -> String {
    at.format("%a-%b-%d-%Y-%H-%M-%S").to_string()
}

pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format("%a %b %d %Y %H:%M:%S GMT%z").to_string()
}

fn post_record(post: &Post) -> String {
    let mut lines = vec![
        format!("TIMESTAMP: {}", format_timestamp(post.posted_at())),
        format!("CAPTION: {}", post.caption()),
    ];

    if let Some(url) = post.media_url() {
        lines.push(format!("{}: {}", post.media_type().url_label(), url));
    }
    for child in post.sidecar_children() {
        if let Some(url) = child.url() {
            lines.push(format!("{}: {}", child.media_type().url_label(), url));
        }
    }

    lines.join("\n")
}
