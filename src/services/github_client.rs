//! GitHub REST client for the two endpoints the widget needs.
//!
//! `GET /users/{username}` and `GET /users/{username}/repos`, both read-only.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::types::errors::{ClientError, LookupError};
use crate::types::github::{GitHubProfile, GitHubRepo};
use crate::types::settings::ClientSettings;

/// Trait defining the GitHub lookups the widget performs.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn fetch_profile(&self, username: &str) -> Result<GitHubProfile, LookupError>;
    async fn fetch_repos(&self, username: &str) -> Result<Vec<GitHubRepo>, LookupError>;
}

/// `reqwest`-backed implementation of [`GitHubApi`].
pub struct GitHubClient {
    http: Client,
    base_url: String,
    repos_per_page: Option<u32>,
}

impl GitHubClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&settings.user_agent)
                .map_err(|e| ClientError::InvalidHeader(format!("user agent: {}", e)))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        if let Some(token) = &settings.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose()))
                .map_err(|_| ClientError::InvalidHeader("token contains invalid characters".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ClientError::BuildFailed(e.to_string()))?;

        Ok(Self {
            http,
            base_url: settings.api_base_url.clone(),
            repos_per_page: settings.repos_per_page,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `{base}/users/{username}[/{suffix}]` with the username as one escaped segment.
    pub fn user_url(&self, username: &str, suffix: Option<&str>) -> Result<Url, LookupError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| LookupError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| LookupError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?;
            segments.pop_if_empty().push("users").push(username);
            if let Some(suffix) = suffix {
                segments.push(suffix);
            }
        }
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        username: &str,
    ) -> Result<T, LookupError> {
        debug!(%url, "GitHub request");
        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            warn!(%url, error = %e, "GitHub request failed");
            LookupError::from(e)
        })?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "GitHub response");
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(username.to_string()));
        }
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "GitHub returned non-success status");
            return Err(LookupError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn fetch_profile(&self, username: &str) -> Result<GitHubProfile, LookupError> {
        let url = self.user_url(username, None)?;
        self.get_json(url, username).await
    }

    async fn fetch_repos(&self, username: &str) -> Result<Vec<GitHubRepo>, LookupError> {
        let mut url = self.user_url(username, Some("repos"))?;
        if let Some(per_page) = self.repos_per_page {
            url.query_pairs_mut().append_pair("per_page", &per_page.to_string());
        }
        self.get_json(url, username).await
    }
}
