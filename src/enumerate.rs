//! Folder listing and file metadata retrieval from the contents API.

use crate::client::GithubClient;
use crate::error::FetchError;
use crate::types::{ContentItem, FileEntry};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Fetches one contents API URL and decodes its JSON body.
///
/// A non-success status is an error; the body is returned as raw JSON so
/// callers can check its shape.
async fn fetch_listing(
    client: &GithubClient,
    api_url: &str,
) -> Result<serde_json::Value, FetchError> {
    let response = client.get(api_url).await?;

    let status = response.status();
    if !status.is_success() {
        if status.as_u16() == 404 {
            return Err(FetchError::remote(
                api_url,
                format!(
                    "Not found: {}. Check that the repository is public, \
                     the branch exists and the path is spelled correctly.",
                    api_url
                ),
            ));
        } else {
            return Err(FetchError::remote(
                api_url,
                format!("Failed to fetch from GitHub API ({}): HTTP {}", api_url, status),
            ));
        }
    }

    response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| FetchError::remote(api_url, format!("Invalid response from {}: {}", api_url, e)))
}

fn parse_directory(
    api_url: &str,
    body: serde_json::Value,
) -> Result<VecDeque<ContentItem>, FetchError> {
    if !body.is_array() {
        return Err(FetchError::remote(api_url, "Not a directory"));
    }
    let items: Vec<ContentItem> = serde_json::from_value(body).map_err(|e| {
        FetchError::remote(
            api_url,
            format!(
                "Invalid directory listing from {}: {}\n\
                 Expected entries with fields: type, name, size, download_url, url",
                api_url, e
            ),
        )
    })?;
    Ok(items.into())
}

/// Lists every file below a folder, descending into subdirectories.
///
/// Entries come out depth-first in the order the API lists them, with paths
/// relative to the requested folder. Anything that is neither a file with a
/// download URL nor a directory (submodules, symlinks) is skipped.
///
/// Any failed listing aborts the whole walk.
pub async fn enumerate_folder(
    client: &GithubClient,
    api_url: &str,
) -> Result<Vec<FileEntry>, FetchError> {
    info!("Listing {}", api_url);

    let root = parse_directory(api_url, fetch_listing(client, api_url).await?)?;

    // Each frame is a partially consumed listing and the path prefix of its directory.
    let mut stack: Vec<(String, VecDeque<ContentItem>)> = vec![(String::new(), root)];
    let mut files = Vec::new();
    let mut directories = 1usize;

    while let Some((prefix, pending)) = stack.last_mut() {
        let Some(item) = pending.pop_front() else {
            stack.pop();
            continue;
        };

        match (item.kind.as_str(), item.download_url, item.url) {
            ("file", Some(download_url), _) => {
                files.push(FileEntry {
                    path: format!("{}{}", prefix, item.name),
                    content_url: download_url,
                    size: item.size,
                });
            }
            ("dir", _, Some(dir_url)) => {
                let child_prefix = format!("{}{}/", prefix, item.name);
                let listing = parse_directory(&dir_url, fetch_listing(client, &dir_url).await?)?;
                directories += 1;
                stack.push((child_prefix, listing));
            }
            (kind, _, _) => {
                debug!("Skipping {} entry {}{}", kind, prefix, item.name);
            }
        }
    }

    info!(
        "Found {} file(s) in {} director{}",
        files.len(),
        directories,
        if directories == 1 { "y" } else { "ies" }
    );
    Ok(files)
}

/// Fetches the metadata of a single file.
///
/// The API must answer with one object of type `file` carrying a
/// `download_url`; the entry's path is the file's own name.
pub async fn fetch_file_entry(
    client: &GithubClient,
    api_url: &str,
) -> Result<FileEntry, FetchError> {
    let body = fetch_listing(client, api_url).await?;

    let item: ContentItem = match body {
        serde_json::Value::Object(_) => serde_json::from_value(body).map_err(|e| {
            FetchError::remote(api_url, format!("Invalid file metadata from {}: {}", api_url, e))
        })?,
        _ => return Err(FetchError::remote(api_url, "Not a file or missing download_url")),
    };

    match (item.kind.as_str(), item.download_url) {
        ("file", Some(download_url)) => Ok(FileEntry {
            path: item.name,
            content_url: download_url,
            size: item.size,
        }),
        _ => Err(FetchError::remote(api_url, "Not a file or missing download_url")),
    }
}
