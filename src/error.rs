//! Error types for resolving and downloading GitHub content.

use crate::types::Stage;
use std::io;
use thiserror::Error;

/// Errors that can occur while resolving, listing, fetching or packing content.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The input does not look like a GitHub file or folder URL.
    #[error("{0}")]
    Parse(String),

    /// A request returned a non-success status or a body of the wrong shape.
    #[error("{message}")]
    RemoteFetch {
        /// The URL that was requested.
        url: String,
        /// What went wrong with it.
        message: String,
    },

    /// The folder listing contained no downloadable files.
    #[error("No files found in this folder.")]
    EmptyFolder,

    /// Packing the retrieved files into a ZIP archive failed.
    #[error("{0}")]
    Archive(String),

    /// Writing the finished artifact to disk failed.
    #[error("{0}")]
    Save(String),

    /// HTTP transport error.
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    /// JSON deserialization error.
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),

    /// I/O error outside of the save step.
    #[error(transparent)]
    IoError(#[from] io::Error),
}

impl FetchError {
    pub(crate) fn remote(url: &str, message: impl Into<String>) -> Self {
        FetchError::RemoteFetch {
            url: url.to_string(),
            message: message.into(),
        }
    }
}

impl From<zip::result::ZipError> for FetchError {
    fn from(e: zip::result::ZipError) -> Self {
        FetchError::Archive(e.to_string())
    }
}

/// A [`FetchError`] tagged with the pipeline stage it happened in.
///
/// Displays as one human-readable line prefixed with the stage's category
/// (`GitHub API error: ...`, `ZIP error: ...`, `Download error: ...`).
/// URL problems are shown as-is.
#[derive(Error, Debug)]
#[error("{}", render(.stage, .source))]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: FetchError,
}

impl PipelineError {
    pub fn new(stage: Stage, source: FetchError) -> Self {
        Self { stage, source }
    }
}

fn category(stage: &Stage) -> Option<&'static str> {
    match stage {
        Stage::Resolving => None,
        Stage::Fetching => Some("GitHub API error"),
        Stage::Zipping => Some("ZIP error"),
        Stage::Downloading | Stage::Done => Some("Download error"),
    }
}

fn fallback(stage: &Stage) -> &'static str {
    match stage {
        Stage::Resolving => "Could not parse GitHub URL. Please check the format.",
        Stage::Fetching => {
            "Failed to fetch files. Check if the folder is public and the URL is correct."
        }
        Stage::Zipping => "Failed to zip files.",
        Stage::Downloading | Stage::Done => "Failed to save the download.",
    }
}

fn render(stage: &Stage, source: &FetchError) -> String {
    let message = source.to_string();
    let message = if message.trim().is_empty() {
        fallback(stage)
    } else {
        message.as_str()
    };
    match category(stage) {
        Some(category) => format!("{}: {}", category, message),
        None => message.to_string(),
    }
}
