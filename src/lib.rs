//! ghdir - download a folder or a single file from a GitHub repository URL
//!
//! This library turns a GitHub web URL into contents API requests, walks the
//! folder tree, downloads every file with a bounded number of parallel
//! requests and packs folders into a ZIP archive.
//!
//! # Features
//!
//! - **Flexible URLs**: `/tree/{branch}/...`, `/blob/{branch}/...` and bare `/{branch}/...` forms
//! - **Recursive Listing**: Nested folders are walked depth-first
//! - **Bounded Concurrency**: At most 6 files in flight by default
//! - **Progress Tracking**: Per-file progress callbacks and terminal progress bars
//! - **Private Repositories**: A token embedded as `https://TOKEN@github.com/...` is forwarded
//!
//! # Example
//!
//! ```no_run
//! use ghdir::{download, DownloadConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DownloadConfig::default();
//! let summary = download(&config, "https://github.com/user/repo/tree/main/src").await?;
//!
//! println!("Saved {} files to {}", summary.file_count, summary.output_path.display());
//! # Ok(())
//! # }
//! ```

mod archive;
mod client;
mod download;
mod enumerate;
mod error;
mod executor;
mod orchestrator;
mod resolve;
#[cfg(test)]
mod test_logs;
mod types;

pub use archive::assemble_archive;
pub use client::GithubClient;
pub use download::{fetch_content, save_artifact};
pub use enumerate::{enumerate_folder, fetch_file_entry};
pub use error::{FetchError, PipelineError};
pub use executor::run_bounded;
pub use orchestrator::{download, file_type_histogram};
pub use resolve::{
    is_github_file_url, is_valid_github_url, redact_credential, resolve, resolve_with_api_base,
};
pub use types::{
    ArchiveOutput, Credential, DownloadConfig, DownloadSummary, FileEntry, RequestDescriptor,
    Stage, DEFAULT_API_BASE, DEFAULT_CONCURRENCY,
};
