use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Archive the media of an Instagram profile into a local folder tree
#[derive(Parser, Debug)]
#[command(name = "gramarchive", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub mode: Mode,

    /// Root folder for logs and downloaded media
    #[arg(long, global = true, default_value = "results")]
    pub output_dir: PathBuf,

    /// Folder scanned for stored post captures in offline mode
    #[arg(long, global = true, default_value = "inputs")]
    pub inputs_dir: PathBuf,

    /// Derive file names by scanning for the first `.jpg`/`.mp4` in the URL basename
    #[arg(long, global = true, default_value_t = false)]
    pub legacy_filenames: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Fetch a profile feed over HTTP and download its media into one flat folder
    Live {
        /// Profile name, `@name` or profile URL
        profile: String,
    },
    /// Read stored post captures and archive each post into its own dated folder
    Offline,
}
