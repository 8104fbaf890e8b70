//! Raw content download and artifact saving.

use crate::client::GithubClient;
use crate::error::FetchError;
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{info, warn};

/// Upper bound on the buffer reserved up front from a `Content-Length` header.
const MAX_PREALLOCATION: u64 = 8 << 20;

fn capacity_hint(content_length: Option<u64>) -> usize {
    content_length.unwrap_or(0).min(MAX_PREALLOCATION) as usize
}

fn verify_length(
    url: &str,
    content_length: Option<u64>,
    received: usize,
) -> Result<(), FetchError> {
    match content_length {
        Some(expected) if expected != received as u64 => Err(FetchError::remote(
            url,
            format!(
                "Size mismatch for {}: expected {} bytes, got {} bytes",
                url, expected, received
            ),
        )),
        Some(_) => Ok(()),
        None => {
            warn!("Content-Length header was not present for {}", url);
            Ok(())
        }
    }
}

/// Downloads the body of `url` into memory.
///
/// Fails on a non-success status, and on a body shorter or longer than the
/// advertised `Content-Length` when the server sent one.
pub async fn fetch_content(client: &GithubClient, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = client.get(url).await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::remote(
            url,
            format!("Failed to fetch {}: HTTP {}", url, status),
        ));
    }

    let content_length = response.content_length();
    let mut body = Vec::with_capacity(capacity_hint(content_length));

    let mut byte_stream = response.bytes_stream();
    while let Some(piece) = byte_stream.next().await {
        body.extend_from_slice(&piece?);
    }

    verify_length(url, content_length, body.len())?;

    Ok(body)
}

/// Writes `bytes` to `output_dir/name`, creating the directory if needed.
///
/// Any failure is reported as [`FetchError::Save`].
pub async fn save_artifact(
    output_dir: &Path,
    name: &str,
    bytes: &[u8],
) -> Result<PathBuf, FetchError> {
    let save_error = |e: std::io::Error| {
        FetchError::Save(format!("Failed to save {}: {}", name, e))
    };

    if Path::new(name).file_name().map(|n| n != name).unwrap_or(true) {
        return Err(FetchError::Save(format!("Refusing to save to {:?}", name)));
    }

    tokio::fs::create_dir_all(output_dir).await.map_err(save_error)?;

    let target = output_dir.join(name);
    if tokio::fs::try_exists(&target).await.unwrap_or(false) {
        warn!("Overwriting existing {}", target.display());
    }

    let mut file = BufWriter::new(tokio::fs::File::create(&target).await.map_err(save_error)?);
    file.write_all(bytes).await.map_err(save_error)?;
    file.flush().await.map_err(save_error)?;

    info!("Saved {} ({} bytes)", target.display(), bytes.len());
    Ok(target)
}
