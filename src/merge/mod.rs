//! Project merging - local write-ups and remote repositories in one list
//!
//! No de-duplication happens: a local project and a repository with the same
//! name both appear.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{self, Dated};
use crate::content::{ContentItem, Metadata};
use crate::github::RemoteRepository;
use crate::helpers::title_case;

/// Where a merged project came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectOrigin {
    Local,
    Remote,
}

/// A project card, whatever its source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedProject {
    pub slug: String,
    pub metadata: Metadata,
    pub content: String,
    pub origin: ProjectOrigin,

    #[serde(skip)]
    loaded_at: Option<DateTime<Utc>>,
}

impl MergedProject {
    /// Link for the card: the explicit link, or the local write-up
    pub fn href(&self) -> String {
        if self.metadata.link.is_empty() {
            format!("work/{}", self.slug)
        } else {
            self.metadata.link.clone()
        }
    }

    /// Map a repository onto the project shape
    pub fn from_repository(repo: RemoteRepository, placeholder_image: &str) -> Self {
        let description = repo.description.unwrap_or_default();
        Self {
            metadata: Metadata {
                title: title_case(&repo.name),
                summary: description.clone(),
                published_at: repo.created_at,
                tag: String::new(),
                image: String::new(),
                images: vec![placeholder_image.to_string()],
                link: repo.html_url,
                team: Vec::new(),
            },
            slug: repo.name,
            content: description,
            origin: ProjectOrigin::Remote,
            loaded_at: None,
        }
    }
}

impl From<ContentItem> for MergedProject {
    fn from(item: ContentItem) -> Self {
        Self {
            slug: item.slug,
            metadata: item.metadata,
            content: item.content,
            origin: ProjectOrigin::Local,
            loaded_at: item.loaded_at,
        }
    }
}

impl Dated for MergedProject {
    fn published(&self) -> DateTime<Utc> {
        crate::helpers::parse_date(&self.metadata.published_at)
            .or(self.loaded_at)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Local items followed by mapped repositories, newest first
pub fn merge_projects(
    local: Vec<ContentItem>,
    remote: Vec<RemoteRepository>,
    placeholder_image: &str,
) -> Vec<MergedProject> {
    let combined: Vec<MergedProject> = local
        .into_iter()
        .map(MergedProject::from)
        .chain(
            remote
                .into_iter()
                .map(|repo| MergedProject::from_repository(repo, placeholder_image)),
        )
        .collect();

    aggregate::newest_first(combined)
}
