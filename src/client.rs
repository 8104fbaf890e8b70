//! Shared HTTP client for the contents API and raw content hosts.

use crate::error::FetchError;
use crate::types::{Credential, DownloadConfig};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use tracing::debug;
use url::Url;

const GITHUB_JSON: &str = "application/vnd.github+json";

/// A `reqwest::Client` plus the GitHub-specific bits every request needs.
///
/// When the input URL carried a token, it is sent as a bearer token to the
/// API origin and to `githubusercontent.com` hosts only.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_origin: Option<url::Origin>,
    credential: Option<Credential>,
}

impl GithubClient {
    pub fn new(config: &DownloadConfig, credential: Option<Credential>) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_origin: Url::parse(&config.api_base).ok().map(|u| u.origin()),
            credential,
        })
    }

    /// Sends a GET request to `url`.
    pub async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let mut request = self.http.get(url);
        if let Some(token) = self.credential_for(url) {
            request = request.bearer_auth(token.expose());
        }
        debug!("GET {}", url);
        Ok(request.send().await?)
    }

    fn credential_for(&self, url: &str) -> Option<&Credential> {
        let credential = self.credential.as_ref()?;
        let parsed = Url::parse(url).ok()?;
        let same_api_origin = self.api_origin.as_ref() == Some(&parsed.origin());
        let raw_host = parsed
            .host_str()
            .is_some_and(|h| h == "githubusercontent.com" || h.ends_with(".githubusercontent.com"));
        (same_api_origin || raw_host).then_some(credential)
    }
}
