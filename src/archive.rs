//! ZIP archive assembly.

use crate::client::GithubClient;
use crate::download::fetch_content;
use crate::error::FetchError;
use crate::executor::run_bounded;
use crate::types::{ArchiveOutput, FileEntry};
use std::collections::BTreeSet;
use std::io::{Cursor, Write};
use tracing::{debug, info};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Downloads every entry and packs them into an in-memory ZIP archive.
///
/// At most `concurrency` files are fetched at once and `on_progress` is
/// called after each one. Packing starts only once every file is in memory;
/// any failed fetch fails the whole archive.
///
/// # Arguments
///
/// * `client` - HTTP client used for the content URLs
/// * `entries` - Files to include, paths relative to the archive root
/// * `concurrency` - Maximum number of parallel fetches
/// * `on_progress` - Called with `(completed, total)` after each fetch
///
/// # Returns
///
/// The archive bytes and the number of content bytes actually retrieved.
pub async fn assemble_archive(
    client: &GithubClient,
    entries: &[FileEntry],
    concurrency: usize,
    on_progress: impl Fn(usize, usize),
) -> Result<ArchiveOutput, FetchError> {
    if let Some(index) = entries.iter().position(|e| e.path.is_empty()) {
        return Err(FetchError::Archive(format!(
            "Entry {} has an empty path (content URL {})",
            index, entries[index].content_url
        )));
    }

    info!(
        "Fetching {} file(s) with up to {} parallel downloads",
        entries.len(),
        concurrency
    );

    let payloads = run_bounded(
        entries,
        concurrency,
        |entry, _| async move {
            let body = fetch_content(client, &entry.content_url)
                .await
                .map_err(|e| match e {
                    FetchError::RemoteFetch { url, .. } => FetchError::RemoteFetch {
                        url,
                        message: format!("Failed to fetch file: {}", entry.path),
                    },
                    other => other,
                })?;
            debug!("Fetched {} ({} bytes)", entry.path, body.len());
            Ok::<_, FetchError>(body)
        },
        on_progress,
    )
    .await?;

    let total_bytes = payloads.iter().map(|p| p.len() as u64).sum();
    let bytes = pack_zip(entries, &payloads)?;

    info!(
        "Packed {} file(s), {} bytes retrieved, archive is {} bytes",
        entries.len(),
        total_bytes,
        bytes.len()
    );
    Ok(ArchiveOutput { bytes, total_bytes })
}

/// Writes each payload under its entry's path, adding parent directory
/// entries the first time a directory is seen.
fn pack_zip(entries: &[FileEntry], payloads: &[Vec<u8>]) -> Result<Vec<u8>, FetchError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut directories = BTreeSet::new();

    for (entry, payload) in entries.iter().zip(payloads) {
        let mut parent = String::new();
        let segments: Vec<&str> = entry.path.split('/').collect();
        for segment in &segments[..segments.len() - 1] {
            parent.push_str(segment);
            parent.push('/');
            if directories.insert(parent.clone()) {
                writer.add_directory(parent.as_str(), options)?;
            }
        }

        writer.start_file(entry.path.as_str(), options)?;
        writer.write_all(payload)?;
    }

    Ok(writer.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip::ZipArchive;

    fn entry(path: &str) -> FileEntry {
        FileEntry {
            path: path.to_string(),
            content_url: format!("http://127.0.0.1:9/{}", path),
            size: 0,
        }
    }

    #[test]
    fn test_pack_zip_preserves_paths_and_bytes() {
        let entries = vec![entry("a.txt"), entry("sub/deeper/b.md"), entry("sub/c.rs")];
        let payloads = vec![b"alpha".to_vec(), b"beta".to_vec(), Vec::new()];

        let bytes = pack_zip(&entries, &payloads).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec!["a.txt", "sub/", "sub/c.rs", "sub/deeper/", "sub/deeper/b.md"]
        );

        let mut content = String::new();
        std::io::Read::read_to_string(&mut archive.by_name("sub/deeper/b.md").unwrap(), &mut content)
            .unwrap();
        assert_eq!(content, "beta");
    }

    #[tokio::test]
    async fn test_empty_path_is_rejected_before_fetching() {
        let client = GithubClient::new(&crate::DownloadConfig::default(), None).unwrap();
        let entries = vec![entry("ok.txt"), entry("")];

        let err = assemble_archive(&client, &entries, 6, |_, _| {})
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Archive(_)));
    }
}
