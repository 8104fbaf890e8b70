//! Mock GitHub contents API for integration tests.
//!
//! Listings live under `/repos/u/r/contents/{path}?ref=main` and raw file
//! bodies under `/raw/{path}`, both on the same wiremock server.

#![allow(dead_code)]

use ghdir::{DownloadConfig, GithubClient};
use serde_json::{json, Value};
use std::path::Path;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn config_for(server: &MockServer, output_dir: &Path) -> DownloadConfig {
    DownloadConfig {
        api_base: server.uri(),
        output_dir: output_dir.to_path_buf(),
        ..DownloadConfig::default()
    }
}

pub fn client_for(server: &MockServer) -> GithubClient {
    GithubClient::new(&config_for(server, Path::new(".")), None).unwrap()
}

pub fn listing_url(server: &MockServer, dir: &str) -> String {
    format!("{}/repos/u/r/contents/{}?ref=main", server.uri(), dir)
}

pub fn raw_url(server: &MockServer, file: &str) -> String {
    format!("{}/raw/{}", server.uri(), file)
}

/// A `file` listing entry whose content lives at `/raw/{full_path}`.
pub fn file_item(server: &MockServer, name: &str, full_path: &str, size: u64) -> Value {
    json!({
        "type": "file",
        "name": name,
        "path": full_path,
        "size": size,
        "url": listing_url(server, full_path),
        "download_url": raw_url(server, full_path),
    })
}

/// A `dir` listing entry pointing at its own listing.
pub fn dir_item(server: &MockServer, name: &str, full_path: &str) -> Value {
    json!({
        "type": "dir",
        "name": name,
        "path": full_path,
        "size": 0,
        "url": listing_url(server, full_path),
        "download_url": null,
    })
}

pub async fn mount_listing(server: &MockServer, dir: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/u/r/contents/{}", dir)))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serves `body` at `/raw/{file}` and expects exactly `times` requests.
pub async fn mount_raw(server: &MockServer, file: &str, body: &[u8], times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/raw/{}", file)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .expect(times)
        .mount(server)
        .await;
}
