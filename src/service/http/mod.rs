use async_trait::async_trait;
use reqwest::{
    header::{self, HeaderMap, HeaderValue, InvalidHeaderValue},
    Client,
};
use serde_json::Value;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::config::InstagramConfig;

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status: {0}")]
    Status(u16),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

/// Transport used by the feed fetcher and the media downloader.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, HttpError>;

    /// Streams the body of `url` into `sink`, returning the number of bytes written.
    async fn download(&self, url: &str, sink: &mut (dyn AsyncWrite + Unpin + Send)) -> Result<u64, HttpError>;
}

#[derive(Clone)]
pub struct HttpService {
    client: Client,
}

impl HttpService {
    pub fn new(config: &InstagramConfig) -> Result<Self, HttpError> {
        let client = Self::create_client(Self::get_platform_headers(config)?, &config.user_agent)?;
        Ok(Self { client })
    }

    fn get_platform_headers(config: &InstagramConfig) -> Result<HeaderMap, HttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(header::REFERER, HeaderValue::from_str(&format!("{}/", config.base_url))?);
        headers.insert("X-IG-App-ID", HeaderValue::from_str(&config.app_id)?);
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        Ok(headers)
    }

    fn create_client(headers: HeaderMap, user_agent: &str) -> Result<Client, HttpError> {
        // no timeouts: transfers run as long as the transport allows
        let client = Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;
        Ok(client)
    }
}

#[async_trait]
impl HttpClient for HttpService {
    async fn get_json(&self, url: &str) -> Result<Value, HttpError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(HttpError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    async fn download(&self, url: &str, sink: &mut (dyn AsyncWrite + Unpin + Send)) -> Result<u64, HttpError> {
        let mut response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(HttpError::Status(response.status().as_u16()));
        }

        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            sink.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        sink.flush().await?;

        Ok(written)
    }
}
