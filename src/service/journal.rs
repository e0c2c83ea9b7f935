use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::config::PathsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalKind {
    Images,
    Videos,
    Errors,
}

/// Append-only text logs under the output root.
///
/// Every entry is framed by a blank line. A failed append is reported on the
/// console and otherwise ignored.
#[derive(Debug, Clone)]
pub struct Journal {
    paths: PathsConfig,
}

impl Journal {
    pub fn new(paths: PathsConfig) -> Self {
        Self { paths }
    }

    pub fn path_of(&self, kind: JournalKind) -> PathBuf {
        match kind {
            JournalKind::Images => self.paths.images_log(),
            JournalKind::Videos => self.paths.videos_log(),
            JournalKind::Errors => self.paths.error_log(),
        }
    }

    pub async fn append(&self, kind: JournalKind, message: &str) {
        self.append_to(&self.path_of(kind), message).await;
    }

    pub async fn append_to(&self, path: &Path, message: &str) {
        if let Err(e) = write_entry(path, message).await {
            error!("Failed to append to {}: {:#}", path.display(), e);
        }
    }

    /// Writes `subject` followed by the error and its causes to the error log.
    pub async fn record_error(&self, subject: &str, error: &(dyn std::error::Error + 'static)) {
        error!("{}: {}", subject, error);
        self.append(JournalKind::Errors, &format!("{}\n{}", subject, error_trace(error)))
            .await;
    }
}

async fn write_entry(path: &Path, message: &str) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;

    file.write_all(format!("\n\n{}", message).as_bytes())
        .await
        .context("Failed to write journal entry")?;

    Ok(())
}

/// Renders an error and its source chain, one cause per line.
pub fn error_trace(error: &(dyn std::error::Error + 'static)) -> String {
    anyhow::Chain::new(error)
        .enumerate()
        .map(|(i, cause)| {
            if i == 0 {
                cause.to_string()
            } else {
                format!("    caused by: {}", cause)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
