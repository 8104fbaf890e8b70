//! Data structures shared by the download pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Default GitHub REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default number of files fetched in parallel while building an archive.
pub const DEFAULT_CONCURRENCY: usize = 6;

/// An access token taken from a `https://TOKEN@github.com/...` URL.
///
/// The value is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// A parsed GitHub URL, ready to be sent to the contents API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestDescriptor {
    /// A single file (`.../blob/{branch}/{path}`).
    File {
        /// Contents API URL for the file.
        api_url: String,
        /// Last segment of the file path.
        file_name: String,
        /// `{owner}/{repo}/{branch}`.
        repo_root: String,
        /// Token embedded in the input URL, if any.
        credential: Option<Credential>,
    },
    /// A directory subtree (`.../tree/{branch}/{path}` or `.../{branch}/{path}`).
    Folder {
        /// Contents API URL for the directory.
        api_url: String,
        /// `{owner}/{repo}/{branch}`.
        repo_root: String,
        /// Token embedded in the input URL, if any.
        credential: Option<Credential>,
    },
}

impl RequestDescriptor {
    pub fn api_url(&self) -> &str {
        match self {
            RequestDescriptor::File { api_url, .. } | RequestDescriptor::Folder { api_url, .. } => {
                api_url
            }
        }
    }

    pub fn repo_root(&self) -> &str {
        match self {
            RequestDescriptor::File { repo_root, .. }
            | RequestDescriptor::Folder { repo_root, .. } => repo_root,
        }
    }

    pub fn credential(&self) -> Option<&Credential> {
        match self {
            RequestDescriptor::File { credential, .. }
            | RequestDescriptor::Folder { credential, .. } => credential.as_ref(),
        }
    }

    /// Name of the artifact saved for a folder request: `{owner}-{repo}-{branch}.zip`.
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.repo_root().replace('/', "-"))
    }
}

/// One downloadable file found in a listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the requested folder, `/`-separated.
    pub path: String,
    /// Raw content URL (`download_url` in the API).
    pub content_url: String,
    /// Size reported by the listing, in bytes.
    pub size: u64,
}

/// One entry of a contents API response.
#[derive(Deserialize, Debug, Clone)]
pub(crate) struct ContentItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Result of packing a folder into a ZIP archive.
#[derive(Debug, Clone)]
pub struct ArchiveOutput {
    /// The encoded ZIP file.
    pub bytes: Vec<u8>,
    /// Sum of the bytes actually retrieved for every member.
    pub total_bytes: u64,
}

/// Report produced after a completed download.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DownloadSummary {
    pub file_count: usize,
    /// Bytes actually retrieved.
    pub total_size: u64,
    /// Lowercase extension → number of files.
    pub file_types: BTreeMap<String, usize>,
    pub files: Vec<FileEntry>,
    /// File name of the saved artifact.
    pub artifact_name: String,
    /// Where the artifact was written.
    pub output_path: PathBuf,
    /// Wall-clock duration of the run, in seconds.
    pub elapsed_secs: f64,
}

/// Configuration for a download run.
///
/// # Example
///
/// ```
/// use ghdir::DownloadConfig;
///
/// let config = DownloadConfig {
///     output_dir: "downloads".into(),
///     max_concurrent_downloads: 8,
///     ..DownloadConfig::default()
/// };
/// assert_eq!(config.api_base, "https://api.github.com");
/// ```
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Base URL of the contents API (e.g., `<https://api.github.com>`)
    pub api_base: String,
    /// Directory the artifact is written to.
    pub output_dir: PathBuf,
    /// Maximum number of files fetched at once while building an archive (default: 6).
    pub max_concurrent_downloads: usize,
    /// `User-Agent` sent with every request. GitHub rejects requests without one.
    pub user_agent: String,
    /// Draw progress bars on stderr.
    pub show_progress: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            output_dir: PathBuf::from("."),
            max_concurrent_downloads: DEFAULT_CONCURRENCY,
            user_agent: format!("ghdir/{}", env!("CARGO_PKG_VERSION")),
            show_progress: false,
        }
    }
}

/// Pipeline stage, used for progress display and error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Parsing the input URL.
    Resolving,
    /// Listing the folder or fetching file metadata.
    Fetching,
    /// Retrieving files and packing the archive.
    Zipping,
    /// Retrieving a single file and saving the artifact.
    Downloading,
    /// Finished.
    Done,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Resolving => "Checking URL...",
            Stage::Fetching => "Retrieving data...",
            Stage::Zipping => "Zipping the data...",
            Stage::Downloading => "Downloading...",
            Stage::Done => "Download complete!",
        }
    }
}
