use crate::service::http::HttpError;

#[derive(Debug, thiserror::Error)]
pub enum InstagramError {
    #[error("Network error: {0}")]
    NetworkError(#[from] HttpError),
    #[error("Unexpected profile response: {0}")]
    ParsingError(#[from] serde_json::Error),
    #[error("Invalid username: {0}")]
    InvalidUsername(String),
}
