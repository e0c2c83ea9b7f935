use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to list inputs folder {}", path.display())]
    InputsDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    pub fn path(&self) -> &Path {
        match self {
            Self::InputsDir { path, .. } | Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}
