//! Repository fetcher - one best-effort read of a user's public repositories

use reqwest::Client;

use super::repository::{filter_showcase, RemoteRepository};
use crate::config::GithubConfig;
use crate::error::FetchError;

/// Fetches repository listings from the remote API
#[derive(Debug, Clone)]
pub struct RepoFetcher {
    client: Client,
    api_base: String,
    per_page: u32,
}

impl RepoFetcher {
    /// Build a fetcher from the `github` config section
    pub fn new(config: &GithubConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Http)?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            per_page: config.per_page,
        })
    }

    /// Listing endpoint for a user
    pub fn repos_url(&self, username: &str) -> String {
        format!("{}/users/{}/repos", self.api_base, username)
    }

    /// Showcase repositories for `username`, most recently updated first.
    ///
    /// Never fails: a network error, a non-2xx status or an undecodable body
    /// is logged and yields an empty list.
    pub async fn fetch_repos(&self, username: &str) -> Vec<RemoteRepository> {
        if username.is_empty() {
            tracing::warn!("No repository username configured, skipping fetch");
            return Vec::new();
        }

        match self.try_fetch(username).await {
            Ok(repos) => {
                let total = repos.len();
                let kept = filter_showcase(repos);
                tracing::debug!(
                    "Fetched {} repositories for {}, kept {}",
                    total,
                    username,
                    kept.len()
                );
                kept
            }
            Err(e) => {
                tracing::error!("Failed to fetch repositories for {}: {}", username, e);
                Vec::new()
            }
        }
    }

    /// The unfiltered listing, with errors surfaced
    pub async fn try_fetch(&self, username: &str) -> Result<Vec<RemoteRepository>, FetchError> {
        let url = self.repos_url(username);
        let per_page = self.per_page.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[("sort", "updated"), ("per_page", per_page.as_str())])
            .send()
            .await
            .map_err(FetchError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status, url });
        }

        response
            .json::<Vec<RemoteRepository>>()
            .await
            .map_err(FetchError::Decode)
    }
}
