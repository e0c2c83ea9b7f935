use std::path::{Path, PathBuf};

use url::Url;

use crate::cli::Cli;
use crate::service::download::FileNaming;

pub const INSTAGRAM_BASE_URL: &str = "https://www.instagram.com";
pub const INSTAGRAM_APP_ID: &str = "936619743392459";
pub const INSTAGRAM_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Empty path for {0}")]
    EmptyPath(&'static str),
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub instagram: InstagramConfig,
    pub download: DownloadConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("output_dir"));
        }
        if self.paths.inputs_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("inputs_dir"));
        }
        Url::parse(&self.instagram.base_url).map_err(|_| ConfigError::InvalidBaseUrl(self.instagram.base_url.clone()))?;
        Ok(())
    }
}

/// Locations of the journals and media folders.
#[derive(Clone, Debug)]
pub struct PathsConfig {
    pub output_dir: PathBuf,
    pub inputs_dir: PathBuf,
}

impl PathsConfig {
    pub fn new(output_dir: impl Into<PathBuf>, inputs_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            inputs_dir: inputs_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn images_log(&self) -> PathBuf {
        self.output_dir.join("imageURLs.txt")
    }

    pub fn videos_log(&self) -> PathBuf {
        self.output_dir.join("videoURLs.txt")
    }

    pub fn error_log(&self) -> PathBuf {
        self.output_dir.join("errorlog.txt")
    }

    /// Shared post record file used by the flat layout.
    pub fn output_log(&self) -> PathBuf {
        self.output_dir.join("output.txt")
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.output_dir.join("downloads")
    }
}

#[derive(Clone, Debug)]
pub struct InstagramConfig {
    pub base_url: String,
    pub app_id: String,
    pub user_agent: String,
}

impl Default for InstagramConfig {
    fn default() -> Self {
        Self {
            base_url: INSTAGRAM_BASE_URL.to_string(),
            app_id: INSTAGRAM_APP_ID.to_string(),
            user_agent: INSTAGRAM_USER_AGENT.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DownloadConfig {
    pub naming: FileNaming,
}

pub fn build_config(cli: &Cli) -> Result<AppConfig, ConfigError> {
    info!("Building AppConfig...");

    let naming = if cli.legacy_filenames {
        FileNaming::Substring
    } else {
        FileNaming::Suffix
    };

    let config = AppConfig {
        paths: PathsConfig::new(&cli.output_dir, &cli.inputs_dir),
        instagram: InstagramConfig::default(),
        download: DownloadConfig { naming },
    };
    config.validate()?;

    info!("AppConfig built");
    Ok(config)
}
