pub mod download;
pub mod http;
pub mod journal;

pub use download::MediaDownloader;
pub use journal::{Journal, JournalKind};
