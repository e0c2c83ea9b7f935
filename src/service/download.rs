use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::fs::{self, File};
use url::Url;

use super::http::{HttpClient, HttpError};

const MEDIA_EXTENSIONS: [&str; 2] = ["jpg", "mp4"];
const PART_SUFFIX: &str = ".part";

/// How a download's file name is derived from its URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileNaming {
    /// Last path segment of the parsed URL, kept only when its extension is a
    /// known media extension.
    #[default]
    Suffix,
    /// Basename of the raw URL string truncated right after the first `.jpg`,
    /// or failing that the first `.mp4`. Matches anywhere in the basename,
    /// query string included.
    Substring,
}

pub fn derive_file_name(url: &str, naming: FileNaming) -> Option<String> {
    match naming {
        FileNaming::Suffix => suffix_file_name(url),
        FileNaming::Substring => substring_file_name(url),
    }
}

fn suffix_file_name(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let name = parsed.path_segments()?.next_back()?;
    let (stem, extension) = name.rsplit_once('.')?;

    if stem.is_empty() || !MEDIA_EXTENSIONS.iter().any(|e| extension.eq_ignore_ascii_case(e)) {
        return None;
    }

    Some(name.to_string())
}

fn substring_file_name(url: &str) -> Option<String> {
    let base_name = url.trim_end_matches('/').rsplit('/').next()?;

    MEDIA_EXTENSIONS.iter().find_map(|extension| {
        let marker = format!(".{}", extension);
        base_name
            .find(&marker)
            .map(|start| base_name[..start + marker.len()].to_string())
    })
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("Failed to fetch {url}")]
    Http {
        url: String,
        #[source]
        source: HttpError,
    },
    #[error("Failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved { path: PathBuf, bytes: u64 },
    /// The URL carries no recognizable media file name.
    Skipped,
}

#[derive(Clone)]
pub struct MediaDownloader {
    http: Arc<dyn HttpClient>,
    naming: FileNaming,
}

impl MediaDownloader {
    pub fn new(http: Arc<dyn HttpClient>, naming: FileNaming) -> Self {
        Self { http, naming }
    }

    /// Streams `url` into a `.part` file next to its target and moves it into
    /// place once the transfer completes. A file already at the target is only
    /// replaced by a finished download.
    pub async fn download(&self, url: &str, dir: &Path) -> Result<DownloadOutcome, DownloadError> {
        let Some(file_name) = derive_file_name(url, self.naming) else {
            debug!("No media file name in {}, skipping", url);
            return Ok(DownloadOutcome::Skipped);
        };

        let path = dir.join(&file_name);
        let part_path = dir.join(format!("{}{}", file_name, PART_SUFFIX));
        let mut file = File::create(&part_path).await.map_err(|source| DownloadError::Io {
            path: part_path.clone(),
            source,
        })?;

        let transfer = self.http.download(url, &mut file).await;
        drop(file);

        let bytes = match transfer {
            Ok(bytes) => bytes,
            Err(source) => {
                discard_part(&part_path).await;
                return Err(DownloadError::Http {
                    url: url.to_string(),
                    source,
                });
            }
        };

        if let Err(source) = fs::rename(&part_path, &path).await {
            discard_part(&part_path).await;
            return Err(DownloadError::Io { path, source });
        }

        info!("Saved {} ({} bytes)", path.display(), bytes);
        Ok(DownloadOutcome::Saved { path, bytes })
    }
}

async fn discard_part(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        warn!("Failed to remove partial file {}: {}", path.display(), e);
    }
}

/// Creates `path` and its parents when missing. Existing folders are left untouched.
pub async fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path).await
}
