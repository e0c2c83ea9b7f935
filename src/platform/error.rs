use super::archive::SourceError;
use super::instagram::InstagramError;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Instagram error: {0}")]
    Instagram(#[from] InstagramError),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}
