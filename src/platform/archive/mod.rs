mod error;
pub mod model;

use std::path::{Path, PathBuf};

use tokio::fs;

pub use error::*;
use model::StoredPost;

use super::Post;

/// Result of scanning an inputs folder. Files that could not be read or
/// parsed are kept aside so the caller can journal them.
#[derive(Debug, Default)]
pub struct StoredPosts {
    pub posts: Vec<Post>,
    pub failures: Vec<SourceError>,
}

/// Loads every `*.json` capture in `dir`, ordered by file name.
pub async fn read_stored_posts(dir: &Path) -> Result<StoredPosts, SourceError> {
    info!("Reading stored posts from {}", dir.display());

    let mut files = list_json_files(dir).await.map_err(|source| SourceError::InputsDir {
        path: dir.to_path_buf(),
        source,
    })?;
    files.sort();

    let mut stored = StoredPosts::default();
    for path in files {
        match read_stored_post(&path).await {
            Ok(post) => stored.posts.push(post),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                stored.failures.push(e);
            }
        }
    }

    info!(
        "Read {} stored posts ({} skipped)",
        stored.posts.len(),
        stored.failures.len()
    );
    Ok(stored)
}

async fn list_json_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            files.push(path);
        }
    }

    Ok(files)
}

async fn read_stored_post(path: &Path) -> Result<Post, SourceError> {
    let raw = fs::read_to_string(path).await.map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let stored = serde_json::from_str::<StoredPost>(&raw).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(stored.into())
}
