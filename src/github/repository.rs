//! Repository records as returned by the repository-listing API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::helpers::parse_date;

/// Repository owner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub login: String,
}

/// One public repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRepository {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(rename = "stargazers_count", default)]
    pub star_count: u64,
    #[serde(rename = "forks_count", default)]
    pub fork_count: u64,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(rename = "fork", default)]
    pub is_fork: bool,
    #[serde(rename = "private", default)]
    pub is_private: bool,
    #[serde(default)]
    pub owner: Owner,
}

impl RemoteRepository {
    /// Worth showing: not a fork and has a description
    pub fn is_showcase(&self) -> bool {
        !self.is_fork
            && self
                .description
                .as_deref()
                .map(|d| !d.is_empty())
                .unwrap_or(false)
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.created_at)
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.updated_at)
    }
}

/// Keep the showcase repositories, in upstream order
pub fn filter_showcase(repos: Vec<RemoteRepository>) -> Vec<RemoteRepository> {
    repos.into_iter().filter(RemoteRepository::is_showcase).collect()
}

#[cfg(test)]
pub(crate) fn sample(name: &str, description: Option<&str>, is_fork: bool) -> RemoteRepository {
    RemoteRepository {
        id: 1,
        name: name.to_string(),
        description: description.map(str::to_string),
        html_url: format!("https://github.com/someone/{}", name),
        language: None,
        star_count: 0,
        fork_count: 0,
        updated_at: "2024-01-01T00:00:00Z".to_string(),
        created_at: "2023-01-01T00:00:00Z".to_string(),
        is_fork,
        is_private: false,
        owner: Owner {
            login: "someone".to_string(),
        },
    }
}
